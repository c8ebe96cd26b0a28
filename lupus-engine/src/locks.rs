//! Per-game serialization: every mutation touching a given `game_id` and its
//! children runs under that game's lock; unrelated games never contend with each
//! other. One lock per game id, created on first use, rather than a single global
//! guard over every game at once.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use lupus_core::GameId;

#[derive(Default)]
pub struct GameLocks {
    locks: Mutex<HashMap<GameId, Arc<Mutex<()>>>>,
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, game_id: &GameId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("lock registry poisoned");
        locks
            .entry(game_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Runs `f` with exclusive access to `game_id`. Other games proceed concurrently.
    pub fn with_game<T>(&self, game_id: &GameId, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(game_id);
        let _guard: MutexGuard<'_, ()> = lock.lock().expect("game lock poisoned");
        f()
    }
}
