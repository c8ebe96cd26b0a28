//! Phase Sequencer: drives a game through
//! LOBBY → ROLE_REVEAL → NIGHT → DAY → ... → GAME_OVER.
//!
//! `advance` is the only entry point that moves time forward; it's safe to call as
//! often as a caller likes (a poll loop, a request handler that happens to also check
//! the clock) since it only acts once the current phase's deadline has passed.

use rand::Rng;
use rand::seq::SliceRandom;
use tap::Tap;

use lupus_core::{EventKind, GameEvent, GameId, GamePhase};

use crate::clock;
use crate::consts::{DAY_DURATION_SECS, NIGHT_DURATION_SECS, REVEAL_DURATION_SECS};
use crate::day;
use crate::error::EngineError;
use crate::night;
use crate::roles::role_distribution;
use crate::store::GameStore;
use crate::win;

/// Assigns roles and moves a full lobby into ROLE_REVEAL. Callers are responsible for
/// only invoking this once `list_players(game_id).len() == target_players`.
pub fn start_game<S: GameStore, R: Rng>(
    store: &mut S,
    game_id: &GameId,
    rng: &mut R,
    now: u64,
) -> Result<(), EngineError> {
    let mut game = store.get_game(game_id)?;
    if game.state != GamePhase::Lobby {
        return Err(EngineError::ForbiddenState(
            "la partita è già iniziata".to_string(),
        ));
    }

    // Sort first so a deterministic rng yields a deterministic assignment in tests.
    let players = store
        .list_players(game_id)
        .tap_mut(|p| p.sort_by(|a, b| a.id.cmp(&b.id)))
        .tap_mut(|p| p.shuffle(rng));

    let roles = role_distribution(players.len() as u32).tap_mut(|r| r.shuffle(rng));

    let mut roles_in_game = std::collections::HashMap::new();
    for (player, role) in players.into_iter().zip(roles) {
        let mut player = player;
        player.role = Some(role);
        player.original_role = Some(role);
        *roles_in_game.entry(role).or_insert(0u32) += 1;
        store.save_player(player)?;
    }

    game.state = GamePhase::RoleReveal;
    game.roles_in_game = roles_in_game;
    game.phase_end_time = now + REVEAL_DURATION_SECS;
    store.save_game(game)?;

    store.append_event(
        game_id,
        GameEvent {
            turn: 0,
            phase: GamePhase::RoleReveal,
            kind: EventKind::GameStart {
                player_count: store.list_players(game_id).len() as u32,
            },
            detail: "La partita è iniziata, i ruoli sono stati assegnati.".to_string(),
            ts: now,
        },
    )?;

    Ok(())
}

/// Advances `game_id` past its current phase if that phase's deadline has passed.
/// No-op otherwise, and a no-op on a finished game.
#[tracing::instrument(skip(store), fields(game = %game_id))]
pub fn advance<S: GameStore>(store: &mut S, game_id: &GameId, now: u64) -> Result<(), EngineError> {
    let game = store.get_game(game_id)?;
    if !clock::expired(game.phase_end_time, now) {
        return Ok(());
    }

    tracing::info!(phase = %game.state, turn = game.turn_number, "phase deadline expired, advancing");

    match game.state {
        GamePhase::Lobby | GamePhase::GameOver => Ok(()),
        GamePhase::RoleReveal => enter_night(store, game_id, now),
        GamePhase::Night => {
            let deaths = night::resolve_night(store, game_id, game.turn_number, now)?;
            let mut game = store.get_game(game_id)?;
            game.night_deaths = deaths;
            store.save_game(game)?;

            if win::check_win(store, game_id, game.turn_number, now)?.is_some() {
                return Ok(());
            }
            enter_day(store, game_id, now)
        }
        GamePhase::Day => {
            let result = day::resolve_day(store, game_id, game.turn_number, now)?;
            let mut game = store.get_game(game_id)?;
            game.day_deaths = result.burned;
            game.last_day_burned_nick = result.last_burned_nick;
            game.last_day_burned_role = result.last_burned_role;
            store.save_game(game)?;

            if win::check_win(store, game_id, game.turn_number, now)?.is_some() {
                return Ok(());
            }
            enter_night(store, game_id, now)
        }
    }
}

fn enter_night<S: GameStore>(store: &mut S, game_id: &GameId, now: u64) -> Result<(), EngineError> {
    let mut game = store.get_game(game_id)?;
    game.turn_number += 1;
    game.state = GamePhase::Night;
    game.phase_end_time = now + NIGHT_DURATION_SECS;
    game.night_deaths.clear();
    store.save_game(game.clone())?;
    store.clear_actions(game_id);
    store.clear_votes(game_id);

    store.append_event(
        game_id,
        GameEvent {
            turn: game.turn_number,
            phase: GamePhase::Night,
            kind: EventKind::NightStart,
            detail: format!("Scende la notte {}.", game.turn_number),
            ts: now,
        },
    )?;
    Ok(())
}

fn enter_day<S: GameStore>(store: &mut S, game_id: &GameId, now: u64) -> Result<(), EngineError> {
    let mut game = store.get_game(game_id)?;
    game.state = GamePhase::Day;
    game.phase_end_time = now + DAY_DURATION_SECS;
    game.day_deaths.clear();
    store.save_game(game.clone())?;

    store.append_event(
        game_id,
        GameEvent {
            turn: game.turn_number,
            phase: GamePhase::Day,
            kind: EventKind::DayStart,
            detail: format!("Sorge il giorno {}.", game.turn_number),
            ts: now,
        },
    )?;
    Ok(())
}
