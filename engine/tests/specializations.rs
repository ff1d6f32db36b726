mod common;

use common::{builtin, convert_builtin};
use dh_engine::special::{
    self, ConstructOoze, Dragon, MultiattackLegendary, Specialization, SpecializationContext,
    Spellcaster, Undead,
};
use dh_engine::monster::MonsterTrait;
use dh_engine::{Archetype, Classification, Cost, FeatureKind, RangeBand, Tier, TierReference};

#[test]
fn detectors() {
    let dragon = builtin("adult_red_dragon");
    let mage = builtin("mage");
    let zombie = builtin("zombie");
    let pudding = builtin("black_pudding");
    let golem = builtin("iron_golem");
    let ogre = builtin("ogre");

    assert!(MultiattackLegendary.detect(&dragon));
    assert!(MultiattackLegendary.detect(&golem));
    assert!(!MultiattackLegendary.detect(&ogre));
    assert!(Spellcaster.detect(&mage));
    assert!(!Spellcaster.detect(&dragon));
    assert!(Undead.detect(&zombie));
    assert!(ConstructOoze.detect(&pudding));
    assert!(ConstructOoze.detect(&golem));
    assert!(Dragon.detect(&dragon));
    assert!(!Dragon.detect(&golem));

    let none: Vec<&str> = special::builtin()
        .iter()
        .filter(|s| s.detect(&ogre))
        .map(|s| s.name())
        .collect();
    assert!(none.is_empty());
}

#[test]
fn legendary_actions_cost_their_action_count_in_stress() {
    let adv = convert_builtin("adult_red_dragon");
    let wing = adv.feature("Wing Attack").expect("wing attack");
    assert_eq!(wing.kind, FeatureKind::Action);
    assert_eq!(wing.cost, Some(Cost::Stress(2)));
    assert!(wing.damage.is_some());
    assert_eq!(wing.conditions, vec!["Vulnerable".to_string()]);

    assert_eq!(adv.feature("Detect").and_then(|f| f.cost), Some(Cost::Stress(1)));

    let resist = adv.feature("Legendary Resistance").expect("legendary resistance");
    assert_eq!(resist.kind, FeatureKind::Reaction);
    assert_eq!(resist.cost, Some(Cost::Stress(1)));

    assert_eq!(adv.feature("Lair").and_then(|f| f.cost), Some(Cost::Fear(1)));
    assert!(adv.feature("Flurry").unwrap().description.contains("up to 3"));
}

#[test]
fn legendary_bonus_stress_counts_actions() {
    let monster = builtin("adult_red_dragon");
    let refs = TierReference::standard();
    let classification = dh_engine::classify::classify(&monster, Tier::FOUR);
    let ctx = SpecializationContext {
        monster: &monster,
        tier: Tier::FOUR,
        classification: &classification,
        attacks: &[],
        refs: &refs,
    };
    assert_eq!(MultiattackLegendary.convert(&ctx).bonus_stress, 3);
}

#[test]
fn spellcaster_stress_and_spells() {
    let monster = builtin("mage");
    assert_eq!(Spellcaster::bonus_stress(&monster), 5);

    let adv = convert_builtin("mage");
    // Standard at tier 2: base 2 plus ceil(14 / 3).
    assert_eq!(adv.stress, 7);
    assert!(adv
        .feature("Spellcasting")
        .unwrap()
        .description
        .contains("14 slots folded into Stress"));

    let bolt = adv.feature("Fire Bolt").unwrap();
    assert_eq!(bolt.cost, None);
    assert_eq!(bolt.damage.map(|d| d.kind), Some(dh_engine::DamageKind::Magic));

    let fireball = adv.feature("Fireball").unwrap();
    assert_eq!(fireball.cost, Some(Cost::Stress(1)));
    assert_eq!(fireball.damage.map(|d| d.count), Some(2));

    // Only the first three damage spells are kept.
    assert!(adv.feature("Cone Of Cold").is_none());

    assert_eq!(adv.feature("Shield").unwrap().kind, FeatureKind::Reaction);
    assert_eq!(adv.feature("Counterspell").unwrap().kind, FeatureKind::Reaction);
    assert_eq!(
        adv.feature("Greater Invisibility").unwrap().conditions,
        vec!["Hidden".to_string()]
    );
}

#[test]
fn undead_features() {
    let adv = convert_builtin("zombie");
    assert!(adv.feature("Undead Nature").unwrap().description.contains("poisoned"));
    assert!(adv.tags.iter().any(|t| t == "undead"));

    // The zombie is a Minion with no Stress, so its fortitude runs on Fear.
    assert_eq!(adv.archetype, Archetype::Minion);
    let fortitude = adv.feature("Undead Fortitude").unwrap();
    assert_eq!(fortitude.kind, FeatureKind::Reaction);
    assert_eq!(fortitude.cost, Some(Cost::Fear(1)));
    assert!(fortitude.description.starts_with("If damage reduces the zombie to 0 hit points"));
    assert!(fortitude.trigger.is_some());

    let findings = dh_engine::balance::check(&adv, &TierReference::standard());
    assert!(findings.iter().all(|f| f.field != "features"), "{:?}", findings);
}

fn standard_classification() -> Classification {
    Classification {
        archetype: Archetype::Standard,
        role: None,
        confidence: 1.0,
        rule: "standard".to_string(),
    }
}

#[test]
fn undead_fortitude_costs_stress_outside_minions() {
    let monster = builtin("zombie");
    let refs = TierReference::standard();
    let classification = standard_classification();
    let ctx = SpecializationContext {
        monster: &monster,
        tier: Tier::ONE,
        classification: &classification,
        attacks: &[],
        refs: &refs,
    };
    let out = Undead.convert(&ctx);
    let fortitude = out
        .features
        .iter()
        .find(|f| f.name == "Undead Fortitude")
        .unwrap();
    assert_eq!(fortitude.cost, Some(Cost::Stress(1)));

    // It must outrank the passive the base stage builds from the same trait.
    let base = dh_engine::features::base_features(&monster, &refs);
    let merged = dh_engine::features::merge_features(vec![base, out.features.clone()]);
    let kept = merged.iter().find(|f| f.name == "Undead Fortitude").unwrap();
    assert_eq!(kept.kind, FeatureKind::Reaction);
    assert_eq!(kept.cost, Some(Cost::Stress(1)));
}

#[test]
fn turn_resistance_found_behind_other_turn_traits() {
    let mut monster = builtin("zombie");
    monster.traits.insert(
        0,
        MonsterTrait::new("Nocturnal Hunter", "It hunts only at night."),
    );
    monster.traits.push(MonsterTrait::new(
        "Turn Defiance",
        "The ghoul has advantage on saving throws against any effect that turns undead.",
    ));
    let refs = TierReference::standard();
    let classification = standard_classification();
    let ctx = SpecializationContext {
        monster: &monster,
        tier: Tier::ONE,
        classification: &classification,
        attacks: &[],
        refs: &refs,
    };
    let out = Undead.convert(&ctx);
    assert!(out.features.iter().any(|f| f.name == "Turn Resistance"));
}

#[test]
fn ooze_features() {
    let adv = convert_builtin("black_pudding");
    for name in ["Amorphous", "Corrosive Form", "Split", "Spider Climb", "Blindsight"] {
        assert!(adv.feature(name).is_some(), "missing {}", name);
    }
    assert_eq!(adv.feature("Split").unwrap().kind, FeatureKind::Reaction);
    assert!(adv.movement.climbing);
    assert!(adv.tags.iter().any(|t| t == "construct-ooze"));
}

#[test]
fn construct_features() {
    let adv = convert_builtin("iron_golem");
    for name in ["Construct Nature", "Immutable Form", "Magic Resistance", "Fire Absorption"] {
        assert!(adv.feature(name).is_some(), "missing {}", name);
    }
    assert!(adv.feature("Berserk").is_none());
}

#[test]
fn dragon_breath_and_presence() {
    let adv = convert_builtin("adult_red_dragon");
    let breath = adv.feature("Fire Breath").unwrap();
    assert_eq!(breath.cost, Some(Cost::Fear(1)));
    let dmg = breath.damage.unwrap();
    assert_eq!(dmg.kind, dh_engine::DamageKind::Magic);
    assert_eq!(dmg.modifier, 4);
    assert!(breath.description.contains(&RangeBand::Far.to_string()));
    assert!(breath.description.contains("Agility, difficulty 21"));

    let presence = adv.feature("Frightful Presence").unwrap();
    assert_eq!(presence.cost, Some(Cost::Fear(1)));
    assert_eq!(presence.conditions, vec!["Vulnerable".to_string()]);

    assert!(adv.feature("Flight").is_some());
    assert!(adv.movement.flying);
}

#[test]
fn short_breath_is_close_range() {
    let adv = convert_builtin("young_white_dragon");
    let breath = adv.feature("Cold Breath").unwrap();
    assert!(breath.description.contains("Close area"));
    assert!(breath.description.contains("Strength, difficulty 15"));
    // A Bruiser gets no flat bonus on its breath.
    assert_eq!(adv.archetype, Archetype::Bruiser);
    assert_eq!(breath.damage.unwrap().modifier, 0);
}
