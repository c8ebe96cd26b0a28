//! Phase timing. `now` is always passed in rather than read from the
//! system clock, so the resolver/sequencer stay deterministic under test (Design
//! Notes: "time source as an injected capability").

/// Seconds remaining in the current phase, floored at zero. `phase_end_time == 0`
/// (LOBBY/GAME_OVER) always reads as zero seconds left.
pub fn seconds_left(phase_end_time: u64, now: u64) -> u64 {
    phase_end_time.saturating_sub(now)
}

/// Whether the current phase's deadline has passed. A `phase_end_time` of zero never
/// expires — LOBBY and GAME_OVER have no deadline to cross.
pub fn expired(phase_end_time: u64, now: u64) -> bool {
    phase_end_time != 0 && now >= phase_end_time
}
