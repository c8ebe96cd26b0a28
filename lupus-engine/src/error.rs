use thiserror::Error;

use lupus_core::{GameId, PlayerId, UserId};

/// Errors the abstract store surfaces to the engine. Nothing else ever escapes a
/// `GameStore` implementation — see the rules below / §7.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("game {0} not found")]
    GameNotFound(GameId),
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("user {0} has no player in game {1}")]
    NotInGame(UserId, GameId),
}

/// Everything that can go wrong handling a request against the engine, grouped the way
/// the HTTP boundary's status codes group them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Bad field ranges, duplicate username, unknown action for a role — maps to 400.
    #[error("{0}")]
    Validation(String),
    /// No session / bad credentials — maps to 401. The engine itself never produces
    /// this; it is reserved for whatever binds the engine to an authenticated
    /// transport.
    #[error("not authenticated")]
    Auth,
    /// Missing game/player — maps to 404.
    #[error("{0}")]
    NotFound(String),
    /// Wrong phase, dead player acting, not in game, already in another game, lobby
    /// full, already started — maps to 403/400 depending on binding.
    #[error("{0}")]
    ForbiddenState(String),
    /// Duplicate nickname within a game — maps to 409/400 depending on binding.
    #[error("{0}")]
    Conflict(String),
}

impl From<StoreError> for EngineError {
    fn from(value: StoreError) -> Self {
        EngineError::NotFound(value.to_string())
    }
}
