//! The abstract persistence boundary. The engine never talks to a concrete
//! database; it only ever calls through `GameStore`. `memory::InMemoryStore` is the
//! reference implementation used by the test suite.

use std::collections::HashMap;

use lupus_core::{ActionType, GameEvent, GameId, GamePhase, PlayerAttributes, PlayerId, Role, UserId, Winner};

use crate::error::StoreError;

/// Everything the engine persists for a single game.
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub id: GameId,
    pub state: GamePhase,
    pub creator_id: UserId,
    pub target_players: u32,
    pub turn_number: u32,
    /// Absolute unix-seconds deadline for the current phase; `0` when irrelevant
    /// (LOBBY, GAME_OVER).
    pub phase_end_time: u64,
    pub roles_in_game: HashMap<Role, u32>,
    pub winner: Option<Winner>,
    pub winner_detail: String,
    pub last_day_burned_nick: Option<String>,
    pub last_day_burned_role: Option<Role>,
    pub night_deaths: Vec<String>,
    pub day_deaths: Vec<String>,
    pub created_at: u64,
}

impl GameRecord {
    pub fn new(id: GameId, creator_id: UserId, target_players: u32, now: u64) -> Self {
        Self {
            id,
            state: GamePhase::Lobby,
            creator_id,
            target_players,
            turn_number: 0,
            phase_end_time: 0,
            roles_in_game: HashMap::new(),
            winner: None,
            winner_detail: String::new(),
            last_day_burned_nick: None,
            last_day_burned_role: None,
            night_deaths: Vec::new(),
            day_deaths: Vec::new(),
            created_at: now,
        }
    }
}

/// A single player's seat within a game.
#[derive(Clone, Debug)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub game_id: GameId,
    pub user_id: UserId,
    pub nickname: String,
    /// `None` until role assignment at ROLE_REVEAL.
    pub role: Option<Role>,
    /// Frozen at assignment; never changes afterward.
    pub original_role: Option<Role>,
    pub is_alive: bool,
    pub attributes: PlayerAttributes,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, game_id: GameId, user_id: UserId, nickname: String) -> Self {
        Self {
            id,
            game_id,
            user_id,
            nickname,
            role: None,
            original_role: None,
            is_alive: true,
            attributes: PlayerAttributes::default(),
        }
    }
}

/// A night action submitted by `player_id` against `target_id`.
#[derive(Clone, Debug)]
pub struct ActionRecord {
    pub player_id: PlayerId,
    pub action_type: ActionType,
    pub target_id: PlayerId,
}

/// A day lynch vote cast by `player_id` for `target_id`.
#[derive(Clone, Debug)]
pub struct VoteRecord {
    pub player_id: PlayerId,
    pub target_id: PlayerId,
}

/// A guess at another player's original role, for the informational leaderboard.
#[derive(Clone, Debug)]
pub struct GuessRecord {
    pub player_id: PlayerId,
    pub target_id: PlayerId,
    pub guessed_role: Role,
}

/// Counters to add to a user's lifetime stats at game end.
#[derive(Copy, Clone, Default, Debug)]
pub struct StatsDelta {
    pub games: u32,
    pub wins: u32,
    pub wolf_wins: u32,
    pub village_wins: u32,
}

/// Abstract CRUD over the entity families of the rules below Implementations fail with
/// [`StoreError`] when an entity doesn't exist and never surface any other error to
/// the engine (the rules below / §7).
///
/// Object-safe by construction (no generics in any method) so a binding layer can hold
/// a `Box<dyn GameStore>` if it wants to pick a backend at runtime.
pub trait GameStore {
    fn create_game(&mut self, id: GameId, creator_id: UserId, target_players: u32, now: u64) -> GameRecord;
    fn get_game(&self, id: &GameId) -> Result<GameRecord, StoreError>;
    fn save_game(&mut self, game: GameRecord) -> Result<(), StoreError>;
    fn list_lobbies(&self) -> Vec<GameRecord>;
    fn list_finished_for_user(&self, user_id: &UserId) -> Vec<GameRecord>;
    fn find_active_game_for_user(&self, user_id: &UserId) -> Option<GameId>;

    fn add_player(&mut self, game_id: &GameId, user_id: UserId, nickname: String) -> Result<PlayerRecord, StoreError>;
    fn get_player(&self, id: &PlayerId) -> Result<PlayerRecord, StoreError>;
    fn get_player_in_game(&self, game_id: &GameId, user_id: &UserId) -> Result<PlayerRecord, StoreError>;
    fn list_players(&self, game_id: &GameId) -> Vec<PlayerRecord>;
    fn list_alive_players(&self, game_id: &GameId) -> Vec<PlayerRecord>;
    fn save_player(&mut self, player: PlayerRecord) -> Result<(), StoreError>;

    fn upsert_action(&mut self, game_id: &GameId, player_id: &PlayerId, action_type: ActionType, target_id: PlayerId);
    fn remove_action(&mut self, game_id: &GameId, player_id: &PlayerId, action_type: ActionType);
    fn list_actions(&self, game_id: &GameId, action_type: Option<ActionType>) -> Vec<ActionRecord>;
    fn clear_actions(&mut self, game_id: &GameId);

    fn upsert_vote(&mut self, game_id: &GameId, player_id: &PlayerId, target_id: PlayerId);
    fn list_votes(&self, game_id: &GameId) -> Vec<VoteRecord>;
    fn clear_votes(&mut self, game_id: &GameId);

    fn upsert_guess(&mut self, game_id: &GameId, player_id: &PlayerId, target_id: PlayerId, guessed_role: Role);
    fn list_guesses(&self, game_id: &GameId) -> Vec<GuessRecord>;

    fn append_event(&mut self, game_id: &GameId, event: GameEvent) -> Result<(), StoreError>;
    fn list_events(&self, game_id: &GameId) -> Vec<GameEvent>;

    fn bump_user_stats(&mut self, user_id: &UserId, delta: StatsDelta);
}
