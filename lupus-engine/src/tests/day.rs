use lupus_core::{GameId, Role, UserId};

use crate::day::resolve_day;
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

    fn vote(&mut self, voter: usize, target: usize) {
        self.store
            .upsert_vote(&self.game_id, &self.players[voter], self.players[target].clone());
    }
}

#[test_log::test]
fn majority_vote_burns_one_player() {
    let mut fx = Fixture::new(&[Role::Lupo, Role::Villico, Role::Villico, Role::Villico]);
    fx.vote(1, 0);
    fx.vote(2, 0);
    fx.vote(3, 0);

    let result = resolve_day(&mut fx.store, &fx.game_id, 1, 0).unwrap();
    assert_eq!(result.burned, vec!["p0".to_string()]);
    assert_eq!(result.last_burned_role, Some(Role::Lupo));
    assert!(!fx.store.get_player(&fx.players[0]).unwrap().is_alive);
}

#[test_log::test]
fn a_tied_vote_burns_everyone_tied() {
    let mut fx = Fixture::new(&[
        Role::Villico,
        Role::Villico,
        Role::Villico,
        Role::Villico,
        Role::Villico,
        Role::Villico,
        Role::Lupo,
    ]);
    fx.vote(0, 2);
    fx.vote(1, 2);
    fx.vote(2, 2);
    fx.vote(3, 3);
    fx.vote(4, 3);
    fx.vote(5, 3);

    let result = resolve_day(&mut fx.store, &fx.game_id, 1, 0).unwrap();
    assert_eq!(result.burned.len(), 2);
    assert!(!fx.store.get_player(&fx.players[2]).unwrap().is_alive);
    assert!(!fx.store.get_player(&fx.players[3]).unwrap().is_alive);
}

#[test_log::test]
fn no_votes_means_nobody_is_burned() {
    let mut fx = Fixture::new(&[Role::Lupo, Role::Villico]);
    let result = resolve_day(&mut fx.store, &fx.game_id, 1, 0).unwrap();
    assert!(result.burned.is_empty());
    assert!(result.last_burned_nick.is_none());
}
