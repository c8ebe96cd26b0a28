use lupus_core::{ActionType, GameId, Role, UserId};

use crate::night::resolve_night;
use crate::{GameStore, InMemoryStore};

struct Fixture {
    store: InMemoryStore,
    game_id: GameId,
    players: Vec<lupus_core::PlayerId>,
}

impl Fixture {
    fn new(roles: &[Role]) -> Self {
        let mut store = InMemoryStore::new();
        let game_id = GameId::from("TEST1");
        store.create_game(game_id.clone(), UserId::from("creator"), roles.len() as u32, 0);

        let mut players = Vec::new();
        for (i, role) in roles.iter().enumerate() {
            let user_id = UserId::from(format!("u{i}"));
            let mut player = store
                .add_player(&game_id, user_id, format!("p{i}"))
                .unwrap();
            player.role = Some(*role);
            player.original_role = Some(*role);
            store.save_player(player.clone()).unwrap();
            players.push(player.id);
        }

        Self { store, game_id, players }
    }

    fn act(&mut self, actor: usize, action_type: ActionType, target: usize) {
        self.store.upsert_action(
            &self.game_id,
            &self.players[actor],
            action_type,
            self.players[target].clone(),
        );
    }

    fn is_alive(&self, idx: usize) -> bool {
        self.store.get_player(&self.players[idx]).unwrap().is_alive
    }
}

#[test_log::test]
fn lone_wolf_kill_with_no_protection() {
    let mut fx = Fixture::new(&[Role::Lupo, Role::Veggente, Role::Villico, Role::Villico]);
    fx.act(0, ActionType::Kill, 2);

    let deaths = resolve_night(&mut fx.store, &fx.game_id, 1, 0).unwrap();
    assert_eq!(deaths, vec!["p2".to_string()]);
    assert!(!fx.is_alive(2));
}

#[test_log::test]
fn protettore_saves_the_wolves_target() {
    let mut fx = Fixture::new(&[Role::Lupo, Role::Lupo, Role::Protettore, Role::Villico]);
    fx.act(0, ActionType::Kill, 3);
    fx.act(1, ActionType::Kill, 3);
    fx.act(2, ActionType::Protect, 3);

    let deaths = resolve_night(&mut fx.store, &fx.game_id, 1, 0).unwrap();
    assert!(deaths.is_empty());
    assert!(fx.is_alive(3));
}

#[test_log::test]
fn split_wolf_votes_produce_a_tie_and_nobody_dies() {
    let mut fx = Fixture::new(&[
        Role::Lupo,
        Role::Lupo,
        Role::Villico,
        Role::Villico,
        Role::Villico,
        Role::Villico,
        Role::Villico,
        Role::Villico,
    ]);
    fx.act(0, ActionType::Kill, 2);
    fx.act(1, ActionType::Kill, 3);

    let deaths = resolve_night(&mut fx.store, &fx.game_id, 1, 0).unwrap();
    assert!(deaths.is_empty());
    assert!(fx.is_alive(2));
    assert!(fx.is_alive(3));
}

#[test_log::test]
fn kamikaze_explosion_chains_through_a_protector() {
    let roles: Vec<Role> = std::iter::once(Role::Kamikaze)
        .chain(std::iter::once(Role::Protettore))
        .chain(std::iter::once(Role::Villico))
        .chain(std::iter::repeat(Role::Villico).take(13))
        .collect();
    let mut fx = Fixture::new(&roles);

    fx.act(1, ActionType::Protect, 2);
    fx.act(0, ActionType::Explode, 1);

    let deaths = resolve_night(&mut fx.store, &fx.game_id, 1, 0).unwrap();
    assert!(deaths.contains(&"p0".to_string()));
    assert!(deaths.contains(&"p1".to_string()));
    assert!(deaths.contains(&"p2".to_string()));
    assert!(!fx.is_alive(0));
    assert!(!fx.is_alive(1));
    assert!(!fx.is_alive(2));
}

#[test_log::test]
fn mitomane_copies_a_wolf_on_night_two() {
    let mut fx = Fixture::new(&[Role::Mitomane, Role::Lupo, Role::Villico, Role::Villico]);
    fx.act(0, ActionType::Copy, 1);

    resolve_night(&mut fx.store, &fx.game_id, 2, 0).unwrap();

    let mitomane = fx.store.get_player(&fx.players[0]).unwrap();
    assert_eq!(mitomane.role, Some(Role::Lupo));
    assert_eq!(mitomane.original_role, Some(Role::Mitomane));
}

#[test_log::test]
fn criceto_is_immune_to_the_wolf_kill() {
    let mut fx = Fixture::new(&[Role::Lupo, Role::Criceto, Role::Villico]);
    fx.act(0, ActionType::Kill, 1);

    let deaths = resolve_night(&mut fx.store, &fx.game_id, 1, 0).unwrap();
    assert!(deaths.is_empty());
    assert!(fx.is_alive(1));
}

#[test_log::test]
fn mason_dies_alongside_their_unprotected_partner() {
    let mut fx = Fixture::new(&[Role::Lupo, Role::Massone, Role::Massone, Role::Villico]);
    fx.act(0, ActionType::Kill, 1);

    let deaths = resolve_night(&mut fx.store, &fx.game_id, 1, 0).unwrap();
    assert!(deaths.contains(&"p1".to_string()));
    assert!(deaths.contains(&"p2".to_string()));
}
