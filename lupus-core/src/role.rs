use std::fmt;

/// A secret role a player may be assigned.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Lupo,
    Veggente,
    Medium,
    Indemoniato,
    Protettore,
    Kamikaze,
    Massone,
    Criceto,
    Mitomane,
    Oracolo,
    Villico,
}

impl Role {
    /// All eleven roles, in catalog order. Used by the distribution table and by
    /// anything that needs to enumerate the full role set.
    pub const ALL: [Role; 11] = [
        Role::Lupo,
        Role::Veggente,
        Role::Medium,
        Role::Indemoniato,
        Role::Protettore,
        Role::Kamikaze,
        Role::Massone,
        Role::Criceto,
        Role::Mitomane,
        Role::Oracolo,
        Role::Villico,
    ];

    /// The wolf faction proper: who sees whom at night, and who the Veggente's
    /// inspection treats as "is a wolf". Deliberately *not* the same set as
    /// [`Role::is_evil_faction`] — Kamikaze/Oracolo/Indemoniato win with the wolves
    /// but aren't wolves themselves.
    pub fn is_wolf_faction(self) -> bool {
        matches!(self, Role::Lupo)
    }

    /// The faction that wins when the wolves win. A strict superset of
    /// [`Role::is_wolf_faction`].
    pub fn is_evil_faction(self) -> bool {
        matches!(
            self,
            Role::Lupo | Role::Kamikaze | Role::Oracolo | Role::Indemoniato
        )
    }

    /// `true` for the lone neutral role, immune to wolf kills and winning alone.
    pub fn is_neutral(self) -> bool {
        matches!(self, Role::Criceto)
    }

    /// Night actions this role is permitted to submit. Empty for roles with no active
    /// night ability (Medium, Massone, Indemoniato, Villico, Criceto).
    pub fn night_actions(self) -> &'static [ActionType] {
        match self {
            Role::Lupo => &[ActionType::Kill],
            Role::Veggente => &[ActionType::Inspect],
            Role::Oracolo => &[ActionType::InspectRole],
            Role::Protettore => &[ActionType::Protect],
            Role::Kamikaze => &[ActionType::Kill, ActionType::Explode],
            Role::Mitomane => &[ActionType::Copy],
            Role::Medium | Role::Massone | Role::Indemoniato | Role::Criceto | Role::Villico => &[],
        }
    }

    /// `true` for the idle roles allowed to play the informational guessing
    /// side-game (no night action to occupy them instead).
    pub fn may_guess(self) -> bool {
        matches!(self, Role::Villico | Role::Indemoniato | Role::Massone)
    }

    /// The exact Italian display name used throughout the original contract — the
    /// localization is part of the interface, not an implementation detail.
    pub fn display_name(self) -> &'static str {
        match self {
            Role::Lupo => "Lupo",
            Role::Veggente => "Veggente",
            Role::Medium => "Medium",
            Role::Indemoniato => "Indemoniato",
            Role::Protettore => "Protettore",
            Role::Kamikaze => "Kamikaze",
            Role::Massone => "Massone",
            Role::Criceto => "Criceto Mannaro",
            Role::Mitomane => "Mitomane",
            Role::Oracolo => "Oracolo",
            Role::Villico => "Villico",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Role::Lupo => "🐺",
            Role::Veggente => "🔮",
            Role::Medium => "👻",
            Role::Indemoniato => "😈",
            Role::Protettore => "🛡️",
            Role::Kamikaze => "💣",
            Role::Massone => "🤝",
            Role::Criceto => "🐹",
            Role::Mitomane => "🎭",
            Role::Oracolo => "🔮",
            Role::Villico => "🏘️",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A submitted night action, or a day vote's implicit "action". Kept as a tagged union
/// rather than a string so the resolver's pipeline can match exhaustively on it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum ActionType {
    Kill,
    Inspect,
    InspectRole,
    Protect,
    Explode,
    Copy,
}

/// Which faction won a finished game, or that none has won yet.
#[derive(Copy, Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub enum Winner {
    Lupi,
    Villaggio,
    Criceto,
}

impl Winner {
    /// The exact string stored in `winners` and shown to clients.
    pub fn label(self) -> &'static str {
        match self {
            Winner::Lupi => "Lupi",
            Winner::Villaggio => "Villaggio",
            Winner::Criceto => "Criceto Mannaro",
        }
    }

    /// Whether a player holding `role` (their *current* role, post-Mitomane-copy) is
    /// counted a winner under this outcome.
    pub fn player_won(self, role: Role, is_alive: bool) -> bool {
        match self {
            Winner::Criceto => role.is_neutral() && is_alive,
            Winner::Lupi => role.is_evil_faction(),
            Winner::Villaggio => !role.is_evil_faction() && !role.is_neutral(),
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
