mod common;

use dh_engine::attacks::{attack_modifier, damage_for_average, range_band, tier_damage};
use dh_engine::monster::{AttackKind, DamageRoll, RangeFt, SourceAttack};
use dh_engine::stats::{difficulty, evasion, hit_points, thresholds, total_stress};
use dh_engine::{
    Archetype, DamageKind, DamageType, Difficulty, DieSize, RangeBand, Thresholds, Tier,
    TierReference,
};

#[test]
fn evasion_floors_four_fifths_of_ac() {
    assert_eq!(evasion(15, Tier::ONE), 13);
    assert_eq!(evasion(11, Tier::ONE), 9);
    assert_eq!(evasion(19, Tier::FOUR), 19);
}

#[test]
fn threshold_formulas() {
    let refs = TierReference::standard();
    assert_eq!(thresholds(Tier::ONE, Difficulty::Minor, &refs), Thresholds::new(3, 6, 9));
    assert_eq!(thresholds(Tier::TWO, Difficulty::Major, &refs), Thresholds::new(5, 10, 15));
    assert_eq!(thresholds(Tier::FOUR, Difficulty::Severe, &refs), Thresholds::new(8, 16, 24));
}

#[test]
fn thresholds_ascend_for_every_tier_and_difficulty() {
    let refs = TierReference::standard();
    for tier in Tier::ALL {
        for diff in [Difficulty::Minor, Difficulty::Major, Difficulty::Severe] {
            assert!(thresholds(tier, diff, &refs).is_ascending(), "{} {}", tier, diff);
        }
    }
}

#[test]
fn difficulty_by_archetype() {
    assert_eq!(difficulty(Archetype::Minion, 0.25, Tier::ONE), Difficulty::Minor);
    assert_eq!(difficulty(Archetype::Standard, 2.0, Tier::ONE), Difficulty::Minor);
    assert_eq!(difficulty(Archetype::Standard, 3.0, Tier::ONE), Difficulty::Major);
    assert_eq!(difficulty(Archetype::Solo, 17.0, Tier::FOUR), Difficulty::Severe);
    assert_eq!(difficulty(Archetype::Leader, 4.0, Tier::TWO), Difficulty::Severe);
    assert_eq!(difficulty(Archetype::Bruiser, 4.0, Tier::TWO), Difficulty::Major);
}

#[test]
fn hit_points_by_archetype() {
    assert_eq!(hit_points(Archetype::Minion, 500, Tier::FOUR), 1);
    assert_eq!(hit_points(Archetype::Standard, 59, Tier::ONE), 5);
    assert_eq!(hit_points(Archetype::Standard, 7, Tier::TWO), 4);
    assert_eq!(hit_points(Archetype::Solo, 256, Tier::FOUR), 32);
    assert_eq!(hit_points(Archetype::Solo, 40, Tier::THREE), 12);
}

#[test]
fn minions_never_carry_stress() {
    assert_eq!(total_stress(Archetype::Minion, 0, 5), 0);
    assert_eq!(total_stress(Archetype::Solo, 8, 3), 11);
}

#[test]
fn attack_modifier_halves_to_hit() {
    assert_eq!(attack_modifier(6, Tier::ONE), 4);
    assert_eq!(attack_modifier(-3, Tier::TWO), 0);
    assert_eq!(attack_modifier(14, Tier::FOUR), 11);
}

#[test]
fn dice_breakpoints() {
    let refs = TierReference::standard();
    let dice = |avg: f64| {
        let d = damage_for_average(avg, DamageKind::Physical, &refs);
        (d.count, d.die)
    };
    assert_eq!(dice(3.5), (1, DieSize::D6));
    assert_eq!(dice(3.51), (1, DieSize::D8));
    assert_eq!(dice(5.5), (1, DieSize::D8));
    assert_eq!(dice(5.51), (1, DieSize::D10));
    assert_eq!(dice(7.5), (1, DieSize::D10));
    assert_eq!(dice(11.0), (1, DieSize::D12));
    assert_eq!(dice(11.01), (2, DieSize::D8));
    assert_eq!(dice(140.0), (2, DieSize::D8));
}

#[test]
fn tiered_damage_drops_the_flat_modifier_and_maps_type() {
    let refs = TierReference::standard();
    let fire = tier_damage(&DamageRoll::new(2, 6, 3, DamageType::Fire), &refs);
    assert_eq!(fire.kind, DamageKind::Magic);
    assert_eq!(fire.modifier, 0);
    assert_eq!((fire.count, fire.die), (1, DieSize::D10));

    let club = tier_damage(&DamageRoll::new(2, 8, 4, DamageType::Bludgeoning), &refs);
    assert_eq!(club.kind, DamageKind::Physical);
    assert_eq!(club.die, DieSize::D12);
}

fn source(kind: AttackKind, reach: Option<u32>, range: Option<u32>) -> SourceAttack {
    SourceAttack {
        kind,
        to_hit: 4,
        reach,
        range: range.map(|normal| RangeFt { normal, long: None }),
        damage: None,
        extra_damage: Vec::new(),
        effects: None,
    }
}

#[test]
fn range_bands() {
    use AttackKind::*;
    assert_eq!(range_band(&source(MeleeWeapon, None, None)), RangeBand::VeryClose);
    assert_eq!(range_band(&source(MeleeWeapon, Some(10), None)), RangeBand::Close);
    assert_eq!(range_band(&source(RangedWeapon, None, None)), RangeBand::Close);
    assert_eq!(range_band(&source(RangedWeapon, None, Some(80))), RangeBand::Far);
    assert_eq!(range_band(&source(RangedSpell, None, Some(120))), RangeBand::Far);
    assert_eq!(range_band(&source(MeleeOrRanged, Some(5), Some(20))), RangeBand::VeryClose);
    assert_eq!(range_band(&source(MeleeOrRanged, Some(5), Some(30))), RangeBand::Close);
}

#[test]
fn monster_without_attacks_gets_a_strike() {
    let mut monster = common::bare_monster("Scholar", 1.0, 20);
    monster.actions.clear();
    let adv = dh_engine::convert(
        &monster,
        &dh_engine::ConvertOptions::default(),
        &TierReference::standard(),
    )
    .unwrap();
    assert_eq!(adv.attack.name, "Strike");
    assert_eq!(adv.attack.modifier, 3);
    assert!(adv.additional_attacks.is_empty());
    assert!(adv
        .provenance
        .notes
        .iter()
        .any(|n| n.contains("generic Strike")));
}

#[test]
fn invalid_source_is_a_precondition_error() {
    let mut monster = common::bare_monster("Broken", 1.0, 20);
    monster.armor_class = 0;
    let err = dh_engine::convert(
        &monster,
        &dh_engine::ConvertOptions::default(),
        &TierReference::standard(),
    )
    .unwrap_err();
    assert!(matches!(err, dh_engine::ConvertError::Precondition(_)));
}
