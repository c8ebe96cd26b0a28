//! View Projector: builds the per-player redacted projection of a game's state —
//! the only thing a request handler actually sends back to a client. Never leaks a
//! role the requesting player isn't entitled to see.

use std::collections::HashMap;

use lupus_core::{GameEvent, GameId, GamePhase, PlayerId, Role, UserId, Winner};

use crate::error::EngineError;
use crate::store::{GameStore, PlayerRecord};

/// A single entry in the public player list: never exposes role.
pub struct PublicPlayer {
    pub id: PlayerId,
    pub nickname: String,
    pub is_alive: bool,
}

/// Everything returned to the requesting player for a live game. Fields only
/// populated for their relevant phase are left at their zero value otherwise.
pub struct GameView {
    pub game_id: GameId,
    pub state: GamePhase,
    pub turn_number: u32,
    pub seconds_left: u64,
    pub players: Vec<PublicPlayer>,
    pub roles_in_game: HashMap<Role, u32>,

    pub self_player_id: PlayerId,
    pub self_nickname: String,
    pub self_role: Option<Role>,
    pub self_is_alive: bool,

    /// Night-only: nicknames of fellow wolf-faction players, and the current wolf
    /// kill tally (voter nickname → target nickname).
    pub wolf_teammates: Option<Vec<String>>,
    pub wolf_vote_tally: Option<HashMap<String, String>>,
    /// Night-only: a role-specific informational message (Medium post-mortem,
    /// Massone recognition). `None` when the requesting player's role gets none.
    pub night_message: Option<String>,

    pub night_deaths: Vec<String>,
    pub day_votes: Option<HashMap<String, String>>,

    pub winner: Option<Winner>,
    pub winner_detail: String,
    pub events: Vec<GameEvent>,
    pub role_reveal: Vec<RoleRevealEntry>,
    pub guess_leaderboard: Vec<GuessScore>,
}

pub struct RoleRevealEntry {
    pub nickname: String,
    pub original_role: Role,
    pub final_role: Role,
    pub is_alive: bool,
}

pub struct GuessScore {
    pub guesser_nickname: String,
    pub correct: u32,
}

/// Projects the state of `game_id` for `user_id`. `now` drives seconds-left only —
/// callers are expected to have already run `sequencer::advance` for this tick.
pub fn project<S: GameStore>(
    store: &S,
    game_id: &GameId,
    user_id: &UserId,
    now: u64,
) -> Result<GameView, EngineError> {
    let game = store.get_game(game_id)?;
    let players = store.list_players(game_id);
    let me = store.get_player_in_game(game_id, user_id)?;

    let by_id: HashMap<PlayerId, PlayerRecord> =
        players.iter().cloned().map(|p| (p.id.clone(), p)).collect();

    let mut view = GameView {
        game_id: game.id.clone(),
        state: game.state,
        turn_number: game.turn_number,
        seconds_left: crate::clock::seconds_left(game.phase_end_time, now),
        players: players
            .iter()
            .map(|p| PublicPlayer {
                id: p.id.clone(),
                nickname: p.nickname.clone(),
                is_alive: p.is_alive,
            })
            .collect(),
        roles_in_game: game.roles_in_game.clone(),
        self_player_id: me.id.clone(),
        self_nickname: me.nickname.clone(),
        self_role: me.role,
        self_is_alive: me.is_alive,
        wolf_teammates: None,
        wolf_vote_tally: None,
        night_message: None,
        night_deaths: Vec::new(),
        day_votes: None,
        winner: None,
        winner_detail: String::new(),
        events: Vec::new(),
        role_reveal: Vec::new(),
        guess_leaderboard: Vec::new(),
    };

    match game.state {
        GamePhase::Night => {
            if let Some(my_role) = me.role {
                if my_role.is_wolf_faction() {
                    view.wolf_teammates = Some(
                        players
                            .iter()
                            .filter(|p| p.id != me.id && p.role.is_some_and(Role::is_wolf_faction))
                            .map(|p| p.nickname.clone())
                            .collect(),
                    );
                    view.wolf_vote_tally = Some(
                        store
                            .list_actions(game_id, Some(lupus_core::ActionType::Kill))
                            .into_iter()
                            .filter_map(|a| {
                                let voter = by_id.get(&a.player_id)?;
                                let target = by_id.get(&a.target_id)?;
                                Some((voter.nickname.clone(), target.nickname.clone()))
                            })
                            .collect(),
                    );
                }

                if my_role == Role::Medium && game.turn_number >= 2 {
                    view.night_message = Some(match (&game.last_day_burned_nick, game.last_day_burned_role) {
                        (Some(nick), Some(role)) if role.is_wolf_faction() => {
                            format!("👻 Il morto al rogo ({nick}) ERA un Lupo 🐺")
                        }
                        (Some(nick), Some(_)) => {
                            format!("👻 Il morto al rogo ({nick}) NON era un Lupo ✅")
                        }
                        _ => "👻 Nessuno è stato mandato al rogo ieri.".to_string(),
                    });
                }

                if my_role == Role::Massone && game.turn_number == 1 {
                    view.night_message = players
                        .iter()
                        .find(|p| p.id != me.id && p.role == Some(Role::Massone))
                        .map(|p| format!("🤝 L'altro Massone è: {}", p.nickname));
                }
            }
        }
        GamePhase::Day => {
            view.night_deaths = game.night_deaths.clone();
            view.day_votes = Some(
                store
                    .list_votes(game_id)
                    .into_iter()
                    .filter_map(|v| {
                        let voter = by_id.get(&v.player_id)?;
                        let target = by_id.get(&v.target_id)?;
                        Some((voter.nickname.clone(), target.nickname.clone()))
                    })
                    .collect(),
            );
        }
        GamePhase::GameOver => {
            view.winner = game.winner;
            view.winner_detail = game.winner_detail.clone();
            view.events = store.list_events(game_id);
            view.role_reveal = players
                .iter()
                .map(|p| RoleRevealEntry {
                    nickname: p.nickname.clone(),
                    original_role: p.original_role.expect("assigned"),
                    final_role: p.role.expect("assigned"),
                    is_alive: p.is_alive,
                })
                .collect();
            view.guess_leaderboard = guess_leaderboard(store, game_id, &by_id);
        }
        GamePhase::Lobby | GamePhase::RoleReveal => {}
    }

    Ok(view)
}

fn guess_leaderboard<S: GameStore>(
    store: &S,
    game_id: &GameId,
    by_id: &HashMap<PlayerId, PlayerRecord>,
) -> Vec<GuessScore> {
    let mut correct_by_guesser: HashMap<PlayerId, u32> = HashMap::new();
    for guess in store.list_guesses(game_id) {
        let Some(target) = by_id.get(&guess.target_id) else {
            continue;
        };
        if target.original_role == Some(guess.guessed_role) {
            *correct_by_guesser.entry(guess.player_id).or_insert(0) += 1;
        } else {
            correct_by_guesser.entry(guess.player_id).or_insert(0);
        }
    }

    let mut scores: Vec<GuessScore> = correct_by_guesser
        .into_iter()
        .filter_map(|(player_id, correct)| {
            let player = by_id.get(&player_id)?;
            Some(GuessScore {
                guesser_nickname: player.nickname.clone(),
                correct,
            })
        })
        .collect();
    scores.sort_by(|a, b| b.correct.cmp(&a.correct));
    scores
}
