//! Win Detector: checked after every night and day resolution. Three
//! mutually exclusive outcomes, evaluated in a fixed priority order — the Criceto
//! lone-survivor check must run before the evil/village headcount, since a won-down
//! Criceto could otherwise read as a village win by default.

use lupus_core::{EventKind, GameEvent, GameId, GamePhase, Role, Winner};

use crate::error::EngineError;
use crate::store::{GameStore, StatsDelta};

/// Checks whether the game has ended. When it has, burns the winner into the
/// `GameRecord`, appends the `GameEnd` event, and bumps every player's lifetime stats.
/// Idempotent: calling this again on an already-finished game is a no-op, since
/// `sequencer` only calls it while `state != GAME_OVER`.
pub fn check_win<S: GameStore>(store: &mut S, game_id: &GameId, turn: u32, now: u64) -> Result<Option<Winner>, EngineError> {
    let players = store.list_players(game_id);
    let alive = store.list_alive_players(game_id);

    let evil_alive = alive
        .iter()
        .filter(|p| matches!(p.role, Some(Role::Lupo | Role::Kamikaze | Role::Oracolo)))
        .count();
    // Everyone else living — including Indemoniato, who adds no wolf numerical power
    // but is not thereby excluded from the village's headcount either.
    let non_evil_alive = alive.len() - evil_alive;
    let criceto_alive = alive.iter().any(|p| p.role == Some(Role::Criceto));

    let winner = if evil_alive == 0 {
        Some(if criceto_alive { Winner::Criceto } else { Winner::Villaggio })
    } else if evil_alive >= non_evil_alive {
        Some(if criceto_alive { Winner::Criceto } else { Winner::Lupi })
    } else {
        None
    };

    let Some(winner) = winner else {
        return Ok(None);
    };

    tracing::info!(
        ?winner,
        evil_alive,
        non_evil_alive,
        criceto_alive,
        "game {game_id} ended"
    );

    let detail = match winner {
        Winner::Lupi => "I lupi hanno preso il controllo del villaggio!".to_string(),
        Winner::Villaggio => "Tutti i lupi sono stati eliminati!".to_string(),
        Winner::Criceto => "Il Criceto Mannaro è sopravvissuto e vince da solo!".to_string(),
    };

    let mut game = store.get_game(game_id)?;
    game.state = GamePhase::GameOver;
    game.phase_end_time = 0;
    game.winner = Some(winner);
    game.winner_detail = detail.clone();
    store.save_game(game)?;

    store.append_event(
        game_id,
        GameEvent {
            turn,
            phase: GamePhase::GameOver,
            kind: EventKind::GameEnd {
                winner,
                detail: detail.clone(),
            },
            detail: format!("Vincitore: {winner}. {detail}"),
            ts: now,
        },
    )?;

    for player in &players {
        let won = winner.player_won(player.role.expect("assigned"), player.is_alive);
        let delta = StatsDelta {
            games: 1,
            wins: won as u32,
            wolf_wins: (won && winner == Winner::Lupi) as u32,
            village_wins: (won && winner == Winner::Villaggio) as u32,
        };
        store.bump_user_stats(&player.user_id, delta);
    }

    Ok(Some(winner))
}
