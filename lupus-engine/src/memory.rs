//! A `HashMap`-backed [`GameStore`] holding every entity family in process memory.
//! Good enough as a real backend for a single-process deployment, and what the test
//! suite runs against.

use std::collections::HashMap;

use lupus_core::{ActionType, GameEvent, GameId, PlayerId, Role, UserId};

use crate::error::StoreError;
use crate::store::{ActionRecord, GameRecord, GameStore, GuessRecord, PlayerRecord, StatsDelta, VoteRecord};

#[derive(Default)]
struct UserStats {
    games: u32,
    wins: u32,
    wolf_wins: u32,
    village_wins: u32,
}

#[derive(Default)]
pub struct InMemoryStore {
    games: HashMap<GameId, GameRecord>,
    events: HashMap<GameId, Vec<GameEvent>>,
    players: HashMap<PlayerId, PlayerRecord>,
    players_by_game: HashMap<GameId, Vec<PlayerId>>,
    actions: HashMap<GameId, Vec<ActionRecord>>,
    votes: HashMap<GameId, Vec<VoteRecord>>,
    guesses: HashMap<GameId, Vec<GuessRecord>>,
    user_stats: HashMap<UserId, UserStats>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for InMemoryStore {
    fn create_game(&mut self, id: GameId, creator_id: UserId, target_players: u32, now: u64) -> GameRecord {
        let game = GameRecord::new(id.clone(), creator_id, target_players, now);
        self.games.insert(id.clone(), game.clone());
        self.players_by_game.entry(id).or_default();
        game
    }

    fn get_game(&self, id: &GameId) -> Result<GameRecord, StoreError> {
        self.games
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::GameNotFound(id.clone()))
    }

    fn save_game(&mut self, game: GameRecord) -> Result<(), StoreError> {
        if !self.games.contains_key(&game.id) {
            return Err(StoreError::GameNotFound(game.id));
        }
        self.games.insert(game.id.clone(), game);
        Ok(())
    }

    fn list_lobbies(&self) -> Vec<GameRecord> {
        self.games
            .values()
            .filter(|g| g.state == lupus_core::GamePhase::Lobby)
            .cloned()
            .collect()
    }

    fn list_finished_for_user(&self, user_id: &UserId) -> Vec<GameRecord> {
        let mut result: Vec<GameRecord> = self
            .players
            .values()
            .filter(|p| &p.user_id == user_id)
            .filter_map(|p| self.games.get(&p.game_id))
            .filter(|g| g.state == lupus_core::GamePhase::GameOver)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.dedup_by(|a, b| a.id == b.id);
        result
    }

    fn find_active_game_for_user(&self, user_id: &UserId) -> Option<GameId> {
        self.players.values().find_map(|p| {
            if &p.user_id != user_id {
                return None;
            }
            let game = self.games.get(&p.game_id)?;
            (game.state != lupus_core::GamePhase::GameOver).then(|| game.id.clone())
        })
    }

    fn add_player(&mut self, game_id: &GameId, user_id: UserId, nickname: String) -> Result<PlayerRecord, StoreError> {
        if !self.games.contains_key(game_id) {
            return Err(StoreError::GameNotFound(game_id.clone()));
        }
        let player = PlayerRecord::new(PlayerId::new(), game_id.clone(), user_id, nickname);
        self.players.insert(player.id.clone(), player.clone());
        self.players_by_game
            .entry(game_id.clone())
            .or_default()
            .push(player.id.clone());
        Ok(player)
    }

    fn get_player(&self, id: &PlayerId) -> Result<PlayerRecord, StoreError> {
        self.players
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::PlayerNotFound(id.clone()))
    }

    fn get_player_in_game(&self, game_id: &GameId, user_id: &UserId) -> Result<PlayerRecord, StoreError> {
        self.players_by_game
            .get(game_id)
            .into_iter()
            .flatten()
            .filter_map(|pid| self.players.get(pid))
            .find(|p| &p.user_id == user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotInGame(user_id.clone(), game_id.clone()))
    }

    fn list_players(&self, game_id: &GameId) -> Vec<PlayerRecord> {
        self.players_by_game
            .get(game_id)
            .into_iter()
            .flatten()
            .filter_map(|pid| self.players.get(pid))
            .cloned()
            .collect()
    }

    fn list_alive_players(&self, game_id: &GameId) -> Vec<PlayerRecord> {
        self.list_players(game_id)
            .into_iter()
            .filter(|p| p.is_alive)
            .collect()
    }

    fn save_player(&mut self, player: PlayerRecord) -> Result<(), StoreError> {
        if !self.players.contains_key(&player.id) {
            return Err(StoreError::PlayerNotFound(player.id));
        }
        self.players.insert(player.id.clone(), player);
        Ok(())
    }

    fn upsert_action(&mut self, game_id: &GameId, player_id: &PlayerId, action_type: ActionType, target_id: PlayerId) {
        let list = self.actions.entry(game_id.clone()).or_default();
        if let Some(existing) = list
            .iter_mut()
            .find(|a| &a.player_id == player_id && a.action_type == action_type)
        {
            existing.target_id = target_id;
        } else {
            list.push(ActionRecord {
                player_id: player_id.clone(),
                action_type,
                target_id,
            });
        }
    }

    fn remove_action(&mut self, game_id: &GameId, player_id: &PlayerId, action_type: ActionType) {
        if let Some(list) = self.actions.get_mut(game_id) {
            list.retain(|a| !(&a.player_id == player_id && a.action_type == action_type));
        }
    }

    fn list_actions(&self, game_id: &GameId, action_type: Option<ActionType>) -> Vec<ActionRecord> {
        self.actions
            .get(game_id)
            .into_iter()
            .flatten()
            .filter(|a| action_type.is_none_or(|t| a.action_type == t))
            .cloned()
            .collect()
    }

    fn clear_actions(&mut self, game_id: &GameId) {
        self.actions.remove(game_id);
    }

    fn upsert_vote(&mut self, game_id: &GameId, player_id: &PlayerId, target_id: PlayerId) {
        let list = self.votes.entry(game_id.clone()).or_default();
        if let Some(existing) = list.iter_mut().find(|v| &v.player_id == player_id) {
            existing.target_id = target_id;
        } else {
            list.push(VoteRecord {
                player_id: player_id.clone(),
                target_id,
            });
        }
    }

    fn list_votes(&self, game_id: &GameId) -> Vec<VoteRecord> {
        self.votes.get(game_id).cloned().unwrap_or_default()
    }

    fn clear_votes(&mut self, game_id: &GameId) {
        self.votes.remove(game_id);
    }

    fn upsert_guess(&mut self, game_id: &GameId, player_id: &PlayerId, target_id: PlayerId, guessed_role: Role) {
        let list = self.guesses.entry(game_id.clone()).or_default();
        if let Some(existing) = list
            .iter_mut()
            .find(|g| &g.player_id == player_id && g.target_id == target_id)
        {
            existing.guessed_role = guessed_role;
        } else {
            list.push(GuessRecord {
                player_id: player_id.clone(),
                target_id,
                guessed_role,
            });
        }
    }

    fn list_guesses(&self, game_id: &GameId) -> Vec<GuessRecord> {
        self.guesses.get(game_id).cloned().unwrap_or_default()
    }

    fn append_event(&mut self, game_id: &GameId, event: GameEvent) -> Result<(), StoreError> {
        if !self.games.contains_key(game_id) {
            return Err(StoreError::GameNotFound(game_id.clone()));
        }
        self.events.entry(game_id.clone()).or_default().push(event);
        Ok(())
    }

    fn list_events(&self, game_id: &GameId) -> Vec<GameEvent> {
        self.events.get(game_id).cloned().unwrap_or_default()
    }

    fn bump_user_stats(&mut self, user_id: &UserId, delta: StatsDelta) {
        let stats = self.user_stats.entry(user_id.clone()).or_default();
        stats.games += delta.games;
        stats.wins += delta.wins;
        stats.wolf_wins += delta.wolf_wins;
        stats.village_wins += delta.village_wins;
    }
}
