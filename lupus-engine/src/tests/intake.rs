use lupus_core::{ActionType, GameId, GamePhase, Role, UserId};

use crate::intake::{submit_action, submit_guess, submit_vote};
use crate::{GameStore, InMemoryStore};

struct Fixture {
    store: InMemoryStore,
    game_id: GameId,
}

impl Fixture {
    fn new(roles: &[Role], state: GamePhase, turn_number: u32) -> (Self, Vec<UserId>) {
        let mut store = InMemoryStore::new();
        let game_id = GameId::from("TEST1");
        store.create_game(game_id.clone(), UserId::from("creator"), roles.len() as u32, 0);

        let mut user_ids = Vec::new();
        for (i, role) in roles.iter().enumerate() {
            let user_id = UserId::from(format!("u{i}"));
            let mut player = store
                .add_player(&game_id, user_id.clone(), format!("p{i}"))
                .unwrap();
            player.role = Some(*role);
            player.original_role = Some(*role);
            store.save_player(player).unwrap();
            user_ids.push(user_id);
        }

        let mut game = store.get_game(&game_id).unwrap();
        game.state = state;
        game.turn_number = turn_number;
        store.save_game(game).unwrap();

        (Self { store, game_id }, user_ids)
    }

    fn player_id(&self, user_id: &UserId) -> lupus_core::PlayerId {
        self.store
            .get_player_in_game(&self.game_id, user_id)
            .unwrap()
            .id
    }
}

#[test_log::test]
fn lupo_can_kill_and_gets_no_feedback() {
    let (mut fx, users) = Fixture::new(&[Role::Lupo, Role::Villico], GamePhase::Night, 1);
    let target = fx.player_id(&users[1]);

    let result = submit_action(&mut fx.store, &fx.game_id, &users[0], ActionType::Kill, &target).unwrap();
    assert_eq!(result, None);
    assert_eq!(fx.store.list_actions(&fx.game_id, Some(ActionType::Kill)).len(), 1);
}

#[test_log::test]
fn veggente_inspect_reports_wolf() {
    let (mut fx, users) = Fixture::new(&[Role::Veggente, Role::Lupo], GamePhase::Night, 1);
    let target = fx.player_id(&users[1]);

    let result = submit_action(&mut fx.store, &fx.game_id, &users[0], ActionType::Inspect, &target).unwrap();
    assert!(result.unwrap().contains("LUPO"));
}

#[test_log::test]
fn villico_cannot_submit_a_night_action() {
    let (mut fx, users) = Fixture::new(&[Role::Villico, Role::Lupo], GamePhase::Night, 1);
    let target = fx.player_id(&users[1]);

    let err = submit_action(&mut fx.store, &fx.game_id, &users[0], ActionType::Kill, &target).unwrap_err();
    assert!(matches!(err, crate::EngineError::Validation(_)));
}

#[test_log::test]
fn mitomane_copy_rejected_outside_turn_two() {
    let (mut fx, users) = Fixture::new(&[Role::Mitomane, Role::Lupo], GamePhase::Night, 1);
    let target = fx.player_id(&users[1]);

    let err = submit_action(&mut fx.store, &fx.game_id, &users[0], ActionType::Copy, &target).unwrap_err();
    assert!(matches!(err, crate::EngineError::ForbiddenState(_)));
}

#[test_log::test]
fn kamikaze_switching_to_explode_removes_prior_kill() {
    let (mut fx, users) = Fixture::new(&[Role::Kamikaze, Role::Villico, Role::Lupo], GamePhase::Night, 1);
    let villico = fx.player_id(&users[1]);
    let lupo = fx.player_id(&users[2]);

    submit_action(&mut fx.store, &fx.game_id, &users[0], ActionType::Kill, &villico).unwrap();
    assert_eq!(fx.store.list_actions(&fx.game_id, Some(ActionType::Kill)).len(), 1);

    submit_action(&mut fx.store, &fx.game_id, &users[0], ActionType::Explode, &lupo).unwrap();
    assert_eq!(fx.store.list_actions(&fx.game_id, Some(ActionType::Kill)).len(), 0);
    assert_eq!(fx.store.list_actions(&fx.game_id, Some(ActionType::Explode)).len(), 1);
}

#[test_log::test]
fn kamikaze_cannot_explode_twice() {
    let (mut fx, users) = Fixture::new(&[Role::Kamikaze, Role::Villico], GamePhase::Night, 1);
    let target = fx.player_id(&users[1]);

    let mut player = fx.store.get_player_in_game(&fx.game_id, &users[0]).unwrap();
    player.attributes.kamikaze_used = true;
    fx.store.save_player(player).unwrap();

    let err = submit_action(&mut fx.store, &fx.game_id, &users[0], ActionType::Explode, &target).unwrap_err();
    assert!(matches!(err, crate::EngineError::ForbiddenState(_)));
}

#[test_log::test]
fn dead_player_cannot_vote() {
    let (mut fx, users) = Fixture::new(&[Role::Villico, Role::Lupo], GamePhase::Day, 1);
    let target = fx.player_id(&users[1]);

    let mut player = fx.store.get_player_in_game(&fx.game_id, &users[0]).unwrap();
    player.is_alive = false;
    fx.store.save_player(player).unwrap();

    let err = submit_vote(&mut fx.store, &fx.game_id, &users[0], &target).unwrap_err();
    assert!(matches!(err, crate::EngineError::ForbiddenState(_)));
}

#[test_log::test]
fn cannot_vote_for_self() {
    let (mut fx, users) = Fixture::new(&[Role::Villico, Role::Lupo], GamePhase::Day, 1);
    let target = fx.player_id(&users[0]);

    let err = submit_vote(&mut fx.store, &fx.game_id, &users[0], &target).unwrap_err();
    assert!(matches!(err, crate::EngineError::Validation(_)));
}

#[test_log::test]
fn massone_may_guess_but_not_submit_a_night_action() {
    let (mut fx, users) = Fixture::new(&[Role::Massone, Role::Lupo], GamePhase::Night, 1);
    let target = fx.player_id(&users[1]);

    submit_guess(&mut fx.store, &fx.game_id, &users[0], &target, Role::Lupo).unwrap();
    assert_eq!(fx.store.list_guesses(&fx.game_id).len(), 1);
}
