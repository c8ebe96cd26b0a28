//! Day Resolver: tallies lynch votes cast during DAY and burns the
//! result. A tie burns every player who shares the top vote count — there's no
//! revote mechanism in this contract.

use std::collections::{HashMap, HashSet};

use lupus_core::{EventKind, GameEvent, GameId, GamePhase, PlayerId};

use crate::error::EngineError;
use crate::store::GameStore;

/// Outcome of a day's lynch, reported back to the sequencer so it can update
/// `GameRecord::last_day_burned_nick`/`last_day_burned_role` (Medium's information is
/// always about the *most recent* burn, singular, even when a tie burns several).
pub struct DayResult {
    pub burned: Vec<String>,
    pub last_burned_nick: Option<String>,
    pub last_burned_role: Option<lupus_core::Role>,
}

pub fn resolve_day<S: GameStore>(
    store: &mut S,
    game_id: &GameId,
    turn: u32,
    now: u64,
) -> Result<DayResult, EngineError> {
    let votes = store.list_votes(game_id);
    let alive_ids: HashSet<PlayerId> = store
        .list_alive_players(game_id)
        .into_iter()
        .map(|p| p.id)
        .collect();
    let mut players: HashMap<PlayerId, crate::store::PlayerRecord> = store
        .list_players(game_id)
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    let mut result = DayResult {
        burned: Vec::new(),
        last_burned_nick: None,
        last_burned_role: None,
    };

    let live_votes: Vec<_> = votes
        .into_iter()
        .filter(|v| alive_ids.contains(&v.player_id))
        .collect();

    tracing::info!(votes = live_votes.len(), "resolving day vote");

    if live_votes.is_empty() {
        return Ok(result);
    }

    // Tally while remembering first-seen order, so a tie's "first element of
    // top_targets" (spec's Medium rule) matches the order votes came in, not
    // hashmap iteration order.
    let mut tally: HashMap<PlayerId, u32> = HashMap::new();
    let mut order: Vec<PlayerId> = Vec::new();
    for vote in &live_votes {
        if !tally.contains_key(&vote.target_id) {
            order.push(vote.target_id.clone());
        }
        *tally.entry(vote.target_id.clone()).or_insert(0) += 1;
    }
    let max_votes = *tally.values().max().expect("non-empty");
    let burned_ids: Vec<PlayerId> = order
        .into_iter()
        .filter(|target| tally[target] == max_votes)
        .collect();

    for id in &burned_ids {
        let Some(player) = players.get_mut(id) else {
            continue;
        };
        if !player.is_alive {
            continue;
        }
        player.is_alive = false;
        let role = player.role.expect("assigned");
        let nick = player.nickname.clone();

        tracing::info!(victim = %nick, ?role, "burned at the stake");
        result.burned.push(nick.clone());
        if result.last_burned_nick.is_none() {
            result.last_burned_nick = Some(nick.clone());
            result.last_burned_role = Some(role);
        }

        store.append_event(
            game_id,
            GameEvent {
                turn,
                phase: GamePhase::Day,
                kind: EventKind::Burned {
                    victim: nick.clone(),
                    role,
                },
                detail: format!("{nick} mandato al rogo (era {role})"),
                ts: now,
            },
        )?;
    }

    for player in players.into_values() {
        store.save_player(player)?;
    }
    store.clear_votes(game_id);

    Ok(result)
}
