use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub Arc<str>);

        impl $name {
            /// Generates a fresh opaque id. Stores are free to ignore this and assign
            /// their own ids; the engine never parses an id's contents.
            pub fn new() -> Self {
                Self(Arc::from(Uuid::new_v4().simple().to_string().get(..12).unwrap_or_default()))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(Arc::from(value))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(Arc::from(value.as_str()))
            }
        }
    };
}

opaque_id!(
    /// Stable identifier for a registered user. Opaque to the engine; the auth layer
    /// owns how it's minted and verified.
    UserId
);

opaque_id!(
    /// Identifier for a player's seat within a single game. Distinct from `UserId`
    /// because a user only ever holds one `PlayerId` per game but may play many games
    /// over time.
    PlayerId
);

/// A game's join code: five uppercase letters, unique among in-progress games.
///
/// Unlike `UserId`/`PlayerId` this has a specific shape the engine validates on
/// creation, so it is not generated via the opaque-id macro.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct GameId(pub Arc<str>);

impl GameId {
    /// Normalizes user-provided input the way the HTTP layer's `{code}` path param is
    /// normalized before lookup: uppercased, no other transformation.
    pub fn normalize(input: &str) -> Self {
        Self(Arc::from(input.to_uppercase().as_str()))
    }

    /// `true` if `input` is five uppercase ASCII letters — the shape a freshly minted
    /// code must have.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 5 && self.0.bytes().all(|b| b.is_ascii_uppercase())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self::normalize(value)
    }
}
