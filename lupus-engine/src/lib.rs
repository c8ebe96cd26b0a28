//! The Lupus in Tabula game engine: role assignment, night/day resolution, win
//! detection, and the phase sequencer that ties them together, behind a single
//! [`Engine`] facade over an abstract [`GameStore`].

mod clock;
mod consts;
mod day;
mod error;
mod intake;
mod locks;
mod memory;
mod night;
mod roles;
mod sequencer;
mod store;
mod view;
mod win;

pub use consts::{MAX_PLAYERS, MIN_PLAYERS};
pub use error::{EngineError, StoreError};
pub use locks::GameLocks;
pub use memory::InMemoryStore;
pub use roles::role_distribution;
pub use store::{ActionRecord, GameRecord, GameStore, GuessRecord, PlayerRecord, StatsDelta, VoteRecord};
pub use view::{GameView, GuessScore, PublicPlayer, RoleRevealEntry};

use rand::Rng;
use rand::distr::{Distribution, Uniform};

use lupus_core::{ActionType, GameEvent, GameId, GamePhase, PlayerId, Role, UserId};

/// Front door to the engine: every public operation locks its game_id for the
/// duration of the call, so unrelated games proceed in parallel.
pub struct Engine<S> {
    store: S,
    locks: GameLocks,
}

impl<S: GameStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: GameLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a lobby with a fresh, unique 5-letter code and joins `creator_id` to it.
    pub fn create_game<R: Rng>(
        &mut self,
        creator_id: UserId,
        target_players: u32,
        nickname: String,
        rng: &mut R,
        now: u64,
    ) -> Result<GameId, EngineError> {
        if !(consts::MIN_PLAYERS..=consts::MAX_PLAYERS).contains(&target_players) {
            return Err(EngineError::Validation(format!(
                "target_players deve essere tra {} e {}",
                consts::MIN_PLAYERS,
                consts::MAX_PLAYERS
            )));
        }
        if self.store.find_active_game_for_user(&creator_id).is_some() {
            return Err(EngineError::ForbiddenState(
                "sei già in una partita".to_string(),
            ));
        }

        let game_id = loop {
            let candidate = random_game_code(rng);
            if self.store.get_game(&candidate).is_err() {
                break candidate;
            }
        };

        self.locks.with_game(&game_id, || -> Result<(), EngineError> {
            self.store.create_game(game_id.clone(), creator_id.clone(), target_players, now);
            self.store.add_player(&game_id, creator_id, nickname)?;
            Ok(())
        })?;

        Ok(game_id)
    }

    /// Joins an existing lobby by its (already-normalized) code, auto-starting the
    /// game when this join fills it.
    pub fn join_game<R: Rng>(
        &mut self,
        game_id: &GameId,
        user_id: UserId,
        nickname: String,
        rng: &mut R,
        now: u64,
    ) -> Result<PlayerId, EngineError> {
        if self.store.find_active_game_for_user(&user_id).is_some() {
            return Err(EngineError::ForbiddenState(
                "sei già in una partita".to_string(),
            ));
        }

        self.locks.with_game(game_id, || {
            let game = self.store.get_game(game_id)?;
            if game.state != GamePhase::Lobby {
                return Err(EngineError::ForbiddenState(
                    "la partita è già iniziata".to_string(),
                ));
            }

            let existing = self.store.list_players(game_id);
            if existing.len() as u32 >= game.target_players {
                return Err(EngineError::ForbiddenState("lobby piena".to_string()));
            }
            if existing
                .iter()
                .any(|p| p.nickname.eq_ignore_ascii_case(&nickname))
            {
                return Err(EngineError::Conflict(
                    "nickname già in uso in questa partita".to_string(),
                ));
            }

            let player = self.store.add_player(game_id, user_id, nickname)?;

            if existing.len() as u32 + 1 == game.target_players {
                sequencer::start_game(&mut self.store, game_id, rng, now)?;
            }

            Ok(player.id)
        })
    }

    /// Projects the current state for `user_id`, first advancing the phase clock if
    /// the current phase's deadline has passed.
    pub fn get_view(&mut self, game_id: &GameId, user_id: &UserId, now: u64) -> Result<GameView, EngineError> {
        self.locks.with_game(game_id, || {
            sequencer::advance(&mut self.store, game_id, now)?;
            view::project(&self.store, game_id, user_id, now)
        })
    }

    pub fn submit_action(
        &mut self,
        game_id: &GameId,
        user_id: &UserId,
        action_type: ActionType,
        target_id: &PlayerId,
        now: u64,
    ) -> Result<Option<String>, EngineError> {
        self.locks.with_game(game_id, || {
            sequencer::advance(&mut self.store, game_id, now)?;
            intake::submit_action(&mut self.store, game_id, user_id, action_type, target_id)
        })
    }

    pub fn submit_vote(
        &mut self,
        game_id: &GameId,
        user_id: &UserId,
        target_id: &PlayerId,
        now: u64,
    ) -> Result<(), EngineError> {
        self.locks.with_game(game_id, || {
            sequencer::advance(&mut self.store, game_id, now)?;
            intake::submit_vote(&mut self.store, game_id, user_id, target_id)
        })
    }

    pub fn submit_guess(
        &mut self,
        game_id: &GameId,
        user_id: &UserId,
        target_id: &PlayerId,
        guessed_role: Role,
        now: u64,
    ) -> Result<(), EngineError> {
        self.locks.with_game(game_id, || {
            sequencer::advance(&mut self.store, game_id, now)?;
            intake::submit_guess(&mut self.store, game_id, user_id, target_id, guessed_role)
        })
    }

    /// Open lobbies, for the matchmaking listing.
    pub fn list_lobbies(&self) -> Vec<GameRecord> {
        self.store.list_lobbies()
    }

    /// Finished games containing `user_id`, most recent first.
    pub fn history_for_user(&self, user_id: &UserId) -> Vec<GameRecord> {
        self.store.list_finished_for_user(user_id)
    }

    /// Full event log for a finished (or live) game.
    pub fn history_for_game(&mut self, game_id: &GameId, now: u64) -> Result<Vec<GameEvent>, EngineError> {
        self.locks.with_game(game_id, || {
            sequencer::advance(&mut self.store, game_id, now)?;
            Ok(self.store.list_events(game_id))
        })
    }
}

fn random_game_code<R: Rng>(rng: &mut R) -> GameId {
    let letters = Uniform::new_inclusive(b'A', b'Z').expect("valid range");
    let code: String = (0..5).map(|_| letters.sample(&mut *rng) as char).collect();
    GameId::from(code)
}

#[cfg(test)]
mod tests {
    mod day;
    mod intake;
    mod night;
    mod roles;
    mod sequencer;
    mod win;
}
