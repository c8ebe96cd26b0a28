use rand::rngs::mock::StepRng;

use lupus_core::{GameId, GamePhase, UserId};

use crate::sequencer::{advance, start_game};
use crate::{GameStore, InMemoryStore};

fn lobby_with(n: u32) -> (InMemoryStore, GameId) {
    let mut store = InMemoryStore::new();
    let game_id = GameId::from("TEST1");
    store.create_game(game_id.clone(), UserId::from("creator"), n, 0);
    for i in 0..n {
        store
            .add_player(&game_id, UserId::from(format!("u{i}")), format!("p{i}"))
            .unwrap();
    }
    (store, game_id)
}

#[test_log::test]
fn start_game_assigns_every_player_a_role_and_freezes_original_role() {
    let (mut store, game_id) = lobby_with(6);
    let mut rng = StepRng::new(1, 1);

    start_game(&mut store, &game_id, &mut rng, 1_000).unwrap();

    let game = store.get_game(&game_id).unwrap();
    assert_eq!(game.state, GamePhase::RoleReveal);
    assert_eq!(game.roles_in_game.values().sum::<u32>(), 6);

    for player in store.list_players(&game_id) {
        assert!(player.role.is_some());
        assert_eq!(player.role, player.original_role);
    }
}

#[test_log::test]
fn advance_is_a_no_op_before_the_deadline() {
    let (mut store, game_id) = lobby_with(6);
    let mut rng = StepRng::new(1, 1);
    start_game(&mut store, &game_id, &mut rng, 1_000).unwrap();

    advance(&mut store, &game_id, 1_000).unwrap();
    assert_eq!(store.get_game(&game_id).unwrap().state, GamePhase::RoleReveal);
}

#[test_log::test]
fn advance_walks_role_reveal_into_night_once_expired() {
    let (mut store, game_id) = lobby_with(6);
    let mut rng = StepRng::new(1, 1);
    start_game(&mut store, &game_id, &mut rng, 1_000).unwrap();

    let reveal_end = store.get_game(&game_id).unwrap().phase_end_time;
    advance(&mut store, &game_id, reveal_end).unwrap();

    let game = store.get_game(&game_id).unwrap();
    assert_eq!(game.state, GamePhase::Night);
    assert_eq!(game.turn_number, 1);
}

#[test_log::test]
fn advance_is_idempotent_without_time_passing() {
    let (mut store, game_id) = lobby_with(6);
    let mut rng = StepRng::new(1, 1);
    start_game(&mut store, &game_id, &mut rng, 1_000).unwrap();
    let reveal_end = store.get_game(&game_id).unwrap().phase_end_time;
    advance(&mut store, &game_id, reveal_end).unwrap();

    let after_first = store.get_game(&game_id).unwrap();
    advance(&mut store, &game_id, reveal_end).unwrap();
    let after_second = store.get_game(&game_id).unwrap();

    assert_eq!(after_first.state, after_second.state);
    assert_eq!(after_first.turn_number, after_second.turn_number);
}
