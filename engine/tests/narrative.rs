mod common;

use common::builtin;
use dh_engine::classify::classify;
use dh_engine::narrative::{experience_bonus, generate, seed_from_name};
use dh_engine::Tier;

#[test]
fn same_seed_same_story() {
    let goblin = builtin("goblin");
    let c = classify(&goblin, Tier::ONE);
    assert_eq!(generate(&goblin, &c, Tier::ONE, 11), generate(&goblin, &c, Tier::ONE, 11));
}

#[test]
fn skills_come_first() {
    let goblin = builtin("goblin");
    let c = classify(&goblin, Tier::ONE);
    let n = generate(&goblin, &c, Tier::ONE, seed_from_name(&goblin.name));
    assert_eq!(n.experiences[0].name, "Ambush");
    assert_eq!(n.experiences.len(), 2);
    assert!(n.experiences.iter().all(|e| e.bonus == 2));
    assert!(!n.motives_tactics.is_empty());
    assert!(n
        .description
        .starts_with("A small humanoid that fights as a minion."));
}

#[test]
fn bonus_rises_at_tier_three() {
    assert_eq!(experience_bonus(Tier::TWO), 2);
    assert_eq!(experience_bonus(Tier::THREE), 3);
}
