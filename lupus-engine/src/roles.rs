//! The role catalog: which roles exist, what night action each is allowed, and how
//! many of each role a game of `n` players gets.

use lupus_core::Role;

/// Deterministic role distribution for a game of `n` players (6 ≤ n ≤ 30).
///
/// Returns exactly `n` roles in a fixed, unshuffled order; the caller shuffles players
/// (not roles) before zipping the two together, so the order here is irrelevant to the
/// final assignment — only the counts matter.
///
/// Panics if `n` is outside the supported range; callers validate `target_players`
/// before a game ever reaches this function.
pub fn role_distribution(n: u32) -> Vec<Role> {
    assert!(
        (crate::consts::MIN_PLAYERS..=crate::consts::MAX_PLAYERS).contains(&n),
        "role_distribution called with out-of-range player count {n}"
    );

    let mut roles = vec![
        Role::Lupo,
        Role::Veggente,
        Role::Villico,
        Role::Villico,
        Role::Villico,
        Role::Villico,
    ];

    if n >= 7 {
        roles.push(Role::Lupo);
    }
    if n >= 8 {
        roles.push(Role::Villico);
    }
    if n >= 9 {
        roles.push(Role::Medium);
    }
    if n >= 10 {
        roles.push(Role::Indemoniato);
    }
    if n >= 11 {
        roles.push(Role::Protettore);
    }
    if n >= 12 {
        roles.push(Role::Oracolo);
    }

    // At 13 players a lone Villico is added; from 14 on it's replaced by a pair of
    // Massoni instead (so the roster jumps by two, not one, between 13 and 14).
    if n == 13 {
        roles.push(Role::Villico);
    } else if n >= 14 {
        roles.extend([Role::Massone, Role::Massone]);
    }

    if n >= 15 {
        roles.push(Role::Criceto);
    }
    if n >= 16 {
        roles.push(Role::Kamikaze);
    }
    if n >= 17 {
        roles.push(Role::Mitomane);
    }
    if n >= 18 {
        roles.push(Role::Villico);
    }
    if n >= 19 {
        roles.push(Role::Lupo);
    }
    if n >= 20 {
        roles.push(Role::Villico);
    }
    if n >= 21 {
        roles.push(Role::Indemoniato);
    }
    if n >= 22 {
        roles.push(Role::Criceto);
    }

    while roles.len() < n as usize {
        roles.push(Role::Villico);
    }
    roles.truncate(n as usize);
    roles
}
