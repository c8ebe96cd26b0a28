use std::collections::HashMap;

use lupus_core::Role;

use crate::MIN_PLAYERS;
use crate::role_distribution;

fn counts(n: u32) -> HashMap<Role, u32> {
    let mut map = HashMap::new();
    for role in role_distribution(n) {
        *map.entry(role).or_insert(0u32) += 1;
    }
    map
}

#[test]
fn every_n_yields_exactly_n_roles() {
    for n in MIN_PLAYERS..=crate::MAX_PLAYERS {
        assert_eq!(role_distribution(n).len() as u32, n, "n={n}");
    }
}

#[test]
fn base_distribution_at_six() {
    let c = counts(6);
    assert_eq!(c.get(&Role::Lupo).copied(), Some(1));
    assert_eq!(c.get(&Role::Veggente).copied(), Some(1));
    assert_eq!(c.get(&Role::Villico).copied(), Some(4));
}

#[test]
fn thirteen_vs_fourteen_jump_by_two() {
    let c13 = counts(13);
    let c14 = counts(14);
    assert_eq!(c13.get(&Role::Villico).copied(), Some(5));
    assert_eq!(c13.values().sum::<u32>(), 13);
    assert_eq!(c14.get(&Role::Massone).copied(), Some(2));
    assert_eq!(c14.values().sum::<u32>(), 14);
}

#[test]
fn double_lupo_at_nineteen() {
    let c = counts(19);
    assert_eq!(c.get(&Role::Lupo).copied(), Some(2));
}

#[test]
#[should_panic]
fn rejects_too_few_players() {
    role_distribution(5);
}
