use std::fmt;

/// Which stage of a single game the state machine is in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum GamePhase {
    Lobby,
    RoleReveal,
    Night,
    Day,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GamePhase::Lobby => "LOBBY",
            GamePhase::RoleReveal => "ROLE_REVEAL",
            GamePhase::Night => "NIGHT",
            GamePhase::Day => "DAY",
            GamePhase::GameOver => "GAME_OVER",
        };
        f.write_str(s)
    }
}
