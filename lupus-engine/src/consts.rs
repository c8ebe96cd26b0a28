//! Constants for Lupus in Tabula.

/// Minimum number of players a game can target.
pub const MIN_PLAYERS: u32 = 6;
/// Maximum number of players a game can target.
pub const MAX_PLAYERS: u32 = 30;

/// Player count at or above which the wolves get a second kill each night.
pub const DOUBLE_KILL_THRESHOLD: usize = 19;

/// Duration, in seconds, of the ROLE_REVEAL phase.
pub const REVEAL_DURATION_SECS: u64 = 120;
/// Duration, in seconds, of the NIGHT phase.
pub const NIGHT_DURATION_SECS: u64 = 180;
/// Duration, in seconds, of the DAY phase.
pub const DAY_DURATION_SECS: u64 = 180;
