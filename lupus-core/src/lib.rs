//! Data shared between the game engine and whatever consumes it (an HTTP layer, a
//! persistence adapter, a test harness). No game logic lives here.

mod event;
mod ids;
mod phase;
mod role;

pub use event::{EventKind, GameEvent};
pub use ids::{GameId, PlayerId, UserId};
pub use phase::GamePhase;
pub use role::{ActionType, Role, Winner};

/// Per-player flags that accumulate over the course of a game.
///
/// Kept as an explicit struct rather than a stringly-keyed map so new flags are
/// visible at the type level instead of being magic string keys.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, serde::Serialize, serde::Deserialize)]
pub struct PlayerAttributes {
    /// Forbids further [`ActionType::Explode`] submissions once set.
    pub kamikaze_used: bool,
}
