mod common;

use common::convert_builtin;
use dh_engine::scaling::{HARDENED, UNYIELDING};
use dh_engine::{
    quick_adjust, rescale_difficulty, rescale_tier, Archetype, Cost, Difficulty, Preset,
    Thresholds, Tier, TierReference,
};

#[test]
fn same_tier_is_unchanged() {
    let refs = TierReference::standard();
    let ogre = convert_builtin("ogre");
    assert_eq!(rescale_tier(&ogre, Tier::ONE, &refs), ogre);
}

#[test]
fn ogre_up_one_tier() {
    let refs = TierReference::standard();
    let ogre = convert_builtin("ogre");
    let t2 = rescale_tier(&ogre, Tier::TWO, &refs);

    assert_eq!(t2.tier, Tier::TWO);
    assert_eq!(t2.evasion, 11);
    assert_eq!(t2.thresholds, Thresholds::new(4, 8, 11));
    assert_eq!((t2.hp, t2.stress), (7, 2));
    assert_eq!(t2.attack.modifier, 6);
    assert_eq!(t2.attack.damage.to_string(), "2d12 phy");
    assert!(t2
        .provenance
        .notes
        .iter()
        .any(|n| n == "Rescaled from Tier 1 to Tier 2."));
    // The source record is untouched.
    assert_eq!(ogre.tier, Tier::ONE);
}

#[test]
fn solo_relentless_follows_the_tier() {
    let refs = TierReference::standard();
    let dragon = convert_builtin("adult_red_dragon");
    let t2 = rescale_tier(&dragon, Tier::TWO, &refs);
    assert_eq!(t2.relentless, Some(2));
    assert!(t2.feature("Relentless (2)").is_some());
    assert!(t2.feature("Relentless (3)").is_none());
    assert!(t2.narrative.experiences.iter().all(|e| e.bonus == 2));
}

#[test]
fn minion_stays_a_minion_across_tiers() {
    let refs = TierReference::standard();
    let goblin = convert_builtin("goblin");
    let t3 = rescale_tier(&goblin, Tier::THREE, &refs);
    assert_eq!((t3.hp, t3.stress), (1, 0));
    assert_eq!(t3.archetype, Archetype::Minion);
}

#[test]
fn difficulty_up_to_severe_adds_hardened() {
    let refs = TierReference::standard();
    let ogre = convert_builtin("ogre");
    let severe = rescale_difficulty(&ogre, Difficulty::Severe, &refs);
    assert_eq!(severe.difficulty, Difficulty::Severe);
    assert_eq!(severe.thresholds, Thresholds::new(5, 10, 15));
    assert_eq!(severe.hp, 8);
    assert!(severe.feature(HARDENED).is_some());

    let again = rescale_difficulty(&severe, Difficulty::Severe, &refs);
    assert_eq!(again, severe);
}

#[test]
fn difficulty_down_to_minor_drops_a_feature() {
    let refs = TierReference::standard();
    let pudding = convert_builtin("black_pudding");
    let major = rescale_difficulty(&pudding, Difficulty::Major, &refs);
    let before = major.features.len();
    let minor = rescale_difficulty(&major, Difficulty::Minor, &refs);
    assert_eq!(minor.features.len(), before - 1);
    assert_eq!(minor.hp, pudding.hp);
    assert!(minor
        .provenance
        .notes
        .iter()
        .any(|n| n.starts_with("Dropped feature")));
}

#[test]
fn presets_on_the_ogre() {
    let ogre = convert_builtin("ogre");

    let tougher = quick_adjust(&ogre, Preset::Tougher);
    assert_eq!(tougher.hp, 7);
    assert_eq!(tougher.thresholds, Thresholds::new(4, 7, 10));

    let weaker = quick_adjust(&ogre, Preset::Weaker);
    assert_eq!(weaker.hp, 3);
    assert_eq!(weaker.thresholds, Thresholds::new(2, 5, 8));

    let deadlier = quick_adjust(&ogre, Preset::Deadlier);
    assert_eq!(deadlier.attack.damage.to_string(), "2d12 phy");

    let softer = quick_adjust(&ogre, Preset::Softer);
    assert_eq!(softer.attack.damage.to_string(), "1d12 phy");

    let elite = quick_adjust(&ogre, Preset::Elite);
    assert_eq!(elite.stress, 2);
    let unyielding = elite.feature(UNYIELDING).unwrap();
    assert_eq!(unyielding.cost, Some(Cost::Stress(1)));
    assert!(elite
        .provenance
        .notes
        .iter()
        .any(|n| n == "Quick adjustment: elite."));
}

#[test]
fn minionize_strips_stress_features() {
    let dragon = convert_builtin("adult_red_dragon");
    let minion = quick_adjust(&dragon, Preset::Minionize);
    assert_eq!(minion.archetype, Archetype::Minion);
    assert_eq!(minion.difficulty, Difficulty::Minor);
    assert_eq!((minion.hp, minion.stress), (1, 0));
    assert_eq!(minion.thresholds, Thresholds::new(1, 1, 1));
    assert_eq!(minion.relentless, None);
    assert!(minion.features.iter().all(|f| !f.costs_stress()));
    assert!(!minion.has_feature_prefix("Relentless"));
    assert!(minion.feature("Minion (10)").is_some());

    assert_eq!(quick_adjust(&minion, Preset::Minionize), minion);
}

#[test]
fn horde_dice_follow_deadlier() {
    let wolves = convert_builtin("dire_wolf");
    let deadlier = quick_adjust(&wolves, Preset::Deadlier);
    let horde = deadlier.horde.unwrap();
    assert_eq!(horde.starting.to_string(), "2d10 phy");
    assert_eq!(horde.reduced.to_string(), "1d10 phy");
}
