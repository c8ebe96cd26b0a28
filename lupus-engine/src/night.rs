//! Night Resolver — the central algorithm. Consumes the set of actions
//! submitted during a NIGHT phase and computes the new player state: Mitomane copies,
//! protections, the wolf kill (with tie rules), Kamikaze explosions with their
//! cascades, and the resulting deaths.
//!
//! Steps run in a fixed order; night actions carry no ordering significance among
//! themselves, only this pipeline's step order does.

use std::collections::{HashMap, HashSet};

use lupus_core::{ActionType, GameEvent, GameId, GamePhase, EventKind, PlayerId, Role};

use crate::consts::DOUBLE_KILL_THRESHOLD;
use crate::error::EngineError;
use crate::store::{GameStore, PlayerRecord};

/// Runs the full night-resolution pipeline and returns the unique, order-preserving
/// list of nicknames who died this night. Player and event mutations are written
/// through `store` as they're decided.
pub fn resolve_night<S: GameStore>(
    store: &mut S,
    game_id: &GameId,
    turn: u32,
    now: u64,
) -> Result<Vec<String>, EngineError> {
    let mut players: HashMap<PlayerId, PlayerRecord> = store
        .list_players(game_id)
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();
    let mut dead_ids: HashSet<PlayerId> = HashSet::new();
    let mut deaths: Vec<String> = Vec::new();

    let mut pending_events: Vec<EventKind> = Vec::new();

    // ── Step 1: Mitomane copy, night 2 only ──
    if turn == 2 {
        for action in store.list_actions(game_id, Some(ActionType::Copy)) {
            let Some(mitomane_alive) = players.get(&action.player_id).map(|p| p.is_alive) else {
                continue;
            };
            if !mitomane_alive {
                continue;
            }
            let Some(target_role) = players.get(&action.target_id).and_then(|p| p.role) else {
                continue;
            };

            let became = if target_role.is_wolf_faction() {
                Role::Lupo
            } else if target_role == Role::Veggente {
                Role::Veggente
            } else {
                Role::Villico
            };

            let mitomane = players
                .get_mut(&action.player_id)
                .expect("checked alive above");
            mitomane.role = Some(became);

            pending_events.push(EventKind::MitomaneCopy {
                mitomane: mitomane.nickname.clone(),
                became,
            });
        }
    }

    // ── Step 2: Protections ──
    let mut protected: HashSet<PlayerId> = HashSet::new();
    let mut protector_of: HashMap<PlayerId, PlayerId> = HashMap::new();
    for action in store.list_actions(game_id, Some(ActionType::Protect)) {
        let Some(protector) = players.get(&action.player_id) else {
            continue;
        };
        if !protector.is_alive {
            continue;
        }
        let protector_nick = protector.nickname.clone();
        let Some(target) = players.get(&action.target_id) else {
            continue;
        };
        pending_events.push(EventKind::Protect {
            protector: protector_nick,
            target: target.nickname.clone(),
        });
        protected.insert(action.target_id.clone());
        protector_of.insert(action.target_id.clone(), action.player_id.clone());
    }

    // ── Step 3: Wolf kill ──
    let kill_actions: Vec<_> = store
        .list_actions(game_id, Some(ActionType::Kill))
        .into_iter()
        .filter(|a| players.get(&a.player_id).is_some_and(|p| p.is_alive))
        .collect();

    if !kill_actions.is_empty() {
        let mut tally: HashMap<PlayerId, u32> = HashMap::new();
        for action in &kill_actions {
            *tally.entry(action.target_id.clone()).or_insert(0) += 1;
        }
        let max_votes = *tally.values().max().expect("non-empty");
        let top_targets: Vec<PlayerId> = tally
            .into_iter()
            .filter(|(_, count)| *count == max_votes)
            .map(|(target, _)| target)
            .collect();

        let capacity = if players.len() >= DOUBLE_KILL_THRESHOLD {
            2
        } else {
            1
        };

        if top_targets.len() > capacity {
            tracing::info!(?top_targets, capacity, "wolf vote tied, nobody dies");
            pending_events.push(EventKind::WolfTie);
        } else {
            for victim_id in &top_targets {
                let Some(victim) = players.get(victim_id).cloned() else {
                    continue;
                };
                if !victim.is_alive {
                    continue;
                }

                if victim.role.is_some_and(Role::is_neutral) {
                    pending_events.push(EventKind::CricetoImmune {
                        victim: victim.nickname.clone(),
                    });
                    continue;
                }
                if protected.contains(victim_id) {
                    pending_events.push(EventKind::Protected {
                        victim: victim.nickname.clone(),
                    });
                    continue;
                }

                kill(&mut players, &mut dead_ids, victim_id);
                deaths.push(victim.nickname.clone());
                pending_events.push(EventKind::WolfKill {
                    victim: victim.nickname.clone(),
                });

                if victim.role == Some(Role::Massone) {
                    if let Some(other_id) = other_mason(&players, victim_id) {
                        let other = players.get(&other_id).cloned().expect("found above");
                        if other.is_alive {
                            if protected.contains(&other_id) {
                                pending_events.push(EventKind::MasonProtected {
                                    mason: other.nickname.clone(),
                                });
                            } else {
                                kill(&mut players, &mut dead_ids, &other_id);
                                if !deaths.contains(&other.nickname) {
                                    deaths.push(other.nickname.clone());
                                }
                                pending_events.push(EventKind::MasonChain {
                                    mason: other.nickname.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    // ── Step 4: Kamikaze explosion ──
    for action in store.list_actions(game_id, Some(ActionType::Explode)) {
        let kamikaze_id = action.player_id.clone();
        let Some(kamikaze) = players.get(&kamikaze_id).cloned() else {
            continue;
        };
        if !kamikaze.is_alive || dead_ids.contains(&kamikaze_id) {
            continue;
        }

        players
            .get_mut(&kamikaze_id)
            .expect("checked above")
            .attributes
            .kamikaze_used = true;

        let mut explosion_ids: HashSet<PlayerId> = HashSet::new();
        let mut explosion_deaths: Vec<String> = Vec::new();

        kill(&mut players, &mut explosion_ids, &kamikaze_id);
        explosion_deaths.push(kamikaze.nickname.clone());

        let target_id = action.target_id.clone();
        if let Some(target) = players.get(&target_id).cloned() {
            if target.is_alive && !dead_ids.contains(&target_id) && !explosion_ids.contains(&target_id) {
                match target.role {
                    Some(Role::Protettore) => {
                        kill(&mut players, &mut explosion_ids, &target_id);
                        explosion_deaths.push(target.nickname.clone());

                        for (protected_id, protector_id) in protector_of.iter() {
                            if protector_id != &target_id {
                                continue;
                            }
                            if let Some(protected_p) = players.get(protected_id).cloned() {
                                if alive_and_unmarked(&protected_p, &dead_ids, &explosion_ids) {
                                    kill(&mut players, &mut explosion_ids, protected_id);
                                    explosion_deaths.push(protected_p.nickname.clone());
                                }
                            }
                        }
                    }
                    _ if protected.contains(&target_id) => {
                        kill(&mut players, &mut explosion_ids, &target_id);
                        explosion_deaths.push(target.nickname.clone());

                        if let Some(protector_id) = protector_of.get(&target_id).cloned() {
                            if let Some(protector) = players.get(&protector_id).cloned() {
                                if alive_and_unmarked(&protector, &dead_ids, &explosion_ids) {
                                    kill(&mut players, &mut explosion_ids, &protector_id);
                                    explosion_deaths.push(protector.nickname.clone());
                                }
                            }
                        }
                    }
                    Some(Role::Massone) => {
                        kill(&mut players, &mut explosion_ids, &target_id);
                        explosion_deaths.push(target.nickname.clone());

                        if let Some(other_id) = other_mason(&players, &target_id) {
                            if let Some(other) = players.get(&other_id).cloned() {
                                if alive_and_unmarked(&other, &dead_ids, &explosion_ids) {
                                    kill(&mut players, &mut explosion_ids, &other_id);
                                    explosion_deaths.push(other.nickname.clone());

                                    if protected.contains(&target_id) {
                                        if let Some(prot_id) = protector_of.get(&target_id).cloned() {
                                            if let Some(prot) = players.get(&prot_id).cloned() {
                                                if alive_and_unmarked(&prot, &dead_ids, &explosion_ids) {
                                                    kill(&mut players, &mut explosion_ids, &prot_id);
                                                    explosion_deaths.push(prot.nickname.clone());
                                                }
                                            }
                                        }
                                    }
                                    if protected.contains(&other_id) {
                                        if let Some(prot_id) = protector_of.get(&other_id).cloned() {
                                            if let Some(prot) = players.get(&prot_id).cloned() {
                                                if alive_and_unmarked(&prot, &dead_ids, &explosion_ids) {
                                                    kill(&mut players, &mut explosion_ids, &prot_id);
                                                    explosion_deaths.push(prot.nickname.clone());
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    _ => {
                        kill(&mut players, &mut explosion_ids, &target_id);
                        explosion_deaths.push(target.nickname.clone());
                    }
                }
            }
        }

        tracing::info!(casualties = ?explosion_deaths, "kamikaze exploded");
        pending_events.push(EventKind::KamikazeExplode {
            casualties: explosion_deaths.clone(),
        });
        dead_ids.extend(explosion_ids);
        for nick in explosion_deaths {
            if !deaths.contains(&nick) {
                deaths.push(nick);
            }
        }
    }

    for player in players.into_values() {
        store.save_player(player)?;
    }

    for kind in pending_events {
        let detail = describe(&kind);
        store.append_event(
            game_id,
            GameEvent {
                turn,
                phase: GamePhase::Night,
                kind,
                detail,
                ts: now,
            },
        )?;
    }

    Ok(deaths)
}

fn alive_and_unmarked(p: &PlayerRecord, dead_ids: &HashSet<PlayerId>, explosion_ids: &HashSet<PlayerId>) -> bool {
    p.is_alive && !dead_ids.contains(&p.id) && !explosion_ids.contains(&p.id)
}

fn kill(players: &mut HashMap<PlayerId, PlayerRecord>, dead_ids: &mut HashSet<PlayerId>, id: &PlayerId) {
    if let Some(p) = players.get_mut(id) {
        p.is_alive = false;
    }
    dead_ids.insert(id.clone());
}

fn other_mason(players: &HashMap<PlayerId, PlayerRecord>, mason_id: &PlayerId) -> Option<PlayerId> {
    players
        .values()
        .find(|p| p.role == Some(Role::Massone) && &p.id != mason_id)
        .map(|p| p.id.clone())
}

fn describe(kind: &EventKind) -> String {
    match kind {
        EventKind::GameStart { player_count } => format!("Partita iniziata con {player_count} giocatori"),
        EventKind::NightStart => "Notte".to_string(),
        EventKind::DayStart => "Giorno".to_string(),
        EventKind::Protect { protector: _, target } => format!("Il Protettore protegge {target}"),
        EventKind::WolfKill { victim } => format!("I lupi hanno ucciso {victim}"),
        EventKind::WolfTie => "I lupi non si sono accordati, nessuno muore.".to_string(),
        EventKind::CricetoImmune { victim } => {
            format!("I lupi hanno attaccato {victim} (Criceto Mannaro) ma non muore!")
        }
        EventKind::Protected { victim } => format!("I lupi hanno attaccato {victim} ma era protetto!"),
        EventKind::MasonProtected { mason } => {
            format!("L'altro massone {mason} era protetto e sopravvive.")
        }
        EventKind::MasonChain { mason } => {
            format!("Anche il massone {mason} muore insieme al compagno!")
        }
        EventKind::MitomaneCopy { mitomane, became } => match became {
            Role::Lupo => format!("{mitomane} ha copiato un Lupo e diventa Lupo!"),
            Role::Veggente => format!("{mitomane} ha copiato il Veggente e diventa Veggente!"),
            _ => format!("{mitomane} ha copiato un ruolo senza effetto, resta Villico."),
        },
        EventKind::KamikazeExplode { casualties } => {
            format!("💥 Il Kamikaze esplode! Morti: {}", casualties.join(", "))
        }
        EventKind::Burned { victim, role } => format!("{victim} mandato al rogo (era {role})"),
        EventKind::GameEnd { winner, detail } => format!("Vincitore: {winner}. {detail}"),
    }
}
