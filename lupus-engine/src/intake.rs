//! Action Intake: validates and upserts a single player's night action,
//! day vote, or guess, returning immediate feedback for inspection-type actions.

use lupus_core::{ActionType, GameId, GamePhase, PlayerId, Role, UserId};

use crate::error::EngineError;
use crate::store::{GameStore, PlayerRecord};

/// Submits a night action. Returns `Some(message)` for INSPECT/INSPECT_ROLE (the
/// immediate feedback those roles get at submission time); `None` otherwise.
pub fn submit_action<S: GameStore>(
    store: &mut S,
    game_id: &GameId,
    user_id: &UserId,
    action_type: ActionType,
    target_id: &PlayerId,
) -> Result<Option<String>, EngineError> {
    let game = store.get_game(game_id)?;
    if game.state != GamePhase::Night {
        return Err(EngineError::ForbiddenState("non è notte".to_string()));
    }

    let player = store.get_player_in_game(game_id, user_id)?;
    if !player.is_alive {
        return Err(EngineError::ForbiddenState("sei morto".to_string()));
    }
    let role = player
        .role
        .expect("alive player in an active game has an assigned role");

    if !role.night_actions().contains(&action_type) {
        return Err(EngineError::Validation(format!(
            "azione {action_type:?} non permessa per {role}"
        )));
    }

    if action_type == ActionType::Copy && game.turn_number != 2 {
        return Err(EngineError::ForbiddenState(
            "il Mitomane agisce solo nella notte 2".to_string(),
        ));
    }

    if action_type == ActionType::Explode && player.attributes.kamikaze_used {
        return Err(EngineError::ForbiddenState(
            "hai già usato l'esplosione".to_string(),
        ));
    }

    let target = store.get_player(target_id)?;
    if target.game_id != *game_id {
        return Err(EngineError::Validation("bersaglio non valido".to_string()));
    }
    if !target.is_alive {
        return Err(EngineError::Validation("il bersaglio è morto".to_string()));
    }
    if target.id == player.id && matches!(action_type, ActionType::Protect | ActionType::Kill) {
        return Err(EngineError::Validation(
            "non puoi bersagliare te stesso".to_string(),
        ));
    }

    // Kamikaze mode-switch: the incoming action supersedes the other one it could
    // have submitted instead, rather than stacking both.
    if role == Role::Kamikaze {
        match action_type {
            ActionType::Explode => store.remove_action(game_id, &player.id, ActionType::Kill),
            ActionType::Kill => store.remove_action(game_id, &player.id, ActionType::Explode),
            _ => {}
        }
    }

    store.upsert_action(game_id, &player.id, action_type, target.id.clone());

    Ok(match action_type {
        ActionType::Inspect => Some(inspect_message(&target)),
        ActionType::InspectRole => Some(inspect_role_message(&target)),
        _ => None,
    })
}

fn inspect_message(target: &PlayerRecord) -> String {
    let role = target.role.expect("assigned");
    if role.is_wolf_faction() {
        format!("{} è un LUPO 🐺", target.nickname)
    } else {
        format!("{} NON è un Lupo ✅", target.nickname)
    }
}

fn inspect_role_message(target: &PlayerRecord) -> String {
    let role = target.role.expect("assigned");
    format!("{} è: {} {}", target.nickname, role.display_name(), role.emoji())
}

/// Submits a day lynch vote.
pub fn submit_vote<S: GameStore>(
    store: &mut S,
    game_id: &GameId,
    user_id: &UserId,
    target_id: &PlayerId,
) -> Result<(), EngineError> {
    let game = store.get_game(game_id)?;
    if game.state != GamePhase::Day {
        return Err(EngineError::ForbiddenState("non è giorno".to_string()));
    }

    let player = store.get_player_in_game(game_id, user_id)?;
    if !player.is_alive {
        return Err(EngineError::ForbiddenState("non puoi votare".to_string()));
    }

    let target = store.get_player(target_id)?;
    if target.game_id != *game_id || !target.is_alive {
        return Err(EngineError::Validation("bersaglio non valido".to_string()));
    }
    if target.id == player.id {
        return Err(EngineError::Validation(
            "non puoi votare te stesso".to_string(),
        ));
    }

    store.upsert_vote(game_id, &player.id, target.id);
    Ok(())
}

/// Submits a guess at another player's original role for the informational
/// leaderboard. Never affects resolution.
pub fn submit_guess<S: GameStore>(
    store: &mut S,
    game_id: &GameId,
    user_id: &UserId,
    target_id: &PlayerId,
    guessed_role: Role,
) -> Result<(), EngineError> {
    let game = store.get_game(game_id)?;
    if !matches!(game.state, GamePhase::Night | GamePhase::Day) {
        return Err(EngineError::ForbiddenState(
            "non puoi indovinare ora".to_string(),
        ));
    }

    let player = store.get_player_in_game(game_id, user_id)?;
    if !player.is_alive {
        return Err(EngineError::ForbiddenState("non puoi giocare".to_string()));
    }
    if !player.role.is_some_and(Role::may_guess) {
        return Err(EngineError::ForbiddenState(
            "solo ruoli senza azione notturna possono giocare".to_string(),
        ));
    }

    let target = store.get_player(target_id)?;
    if target.game_id != *game_id {
        return Err(EngineError::Validation("bersaglio non valido".to_string()));
    }

    store.upsert_guess(game_id, &player.id, target.id, guessed_role);
    Ok(())
}
