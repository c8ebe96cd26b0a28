use crate::phase::GamePhase;

/// One entry in a game's append-only event log.
///
/// `detail` carries the exact human-readable (Italian) sentence the original contract
/// exposes through the history endpoints; `kind` carries the same information as a
/// tagged union so consumers that want to branch on event type don't have to parse
/// `detail`.
#[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub struct GameEvent {
    pub turn: u32,
    pub phase: GamePhase,
    pub kind: EventKind,
    pub detail: String,
    pub ts: u64,
}

/// Every distinct kind of event the engine appends to a game's log.
#[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub enum EventKind {
    GameStart { player_count: u32 },
    NightStart,
    DayStart,
    Protect { protector: String, target: String },
    WolfKill { victim: String },
    WolfTie,
    CricetoImmune { victim: String },
    Protected { victim: String },
    MasonProtected { mason: String },
    MasonChain { mason: String },
    MitomaneCopy { mitomane: String, became: crate::Role },
    KamikazeExplode { casualties: Vec<String> },
    Burned { victim: String, role: crate::Role },
    GameEnd { winner: crate::Winner, detail: String },
}
