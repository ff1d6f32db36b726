//! Undead monsters.

use crate::adversary::{Archetype, Cost, Feature};
use crate::attacks::tier_damage;
use crate::monster::{CreatureType, DamageType, Monster};
use crate::text;

use super::{Specialization, SpecializationContext, SpecializationOutput};

#[derive(Debug, Clone, Copy, Default)]
pub struct Undead;

impl Undead {
    fn nature(monster: &Monster) -> Feature {
        let immune = if monster.condition_immunities.is_empty() {
            "It does not need to breathe, eat or sleep.".to_string()
        } else {
            format!(
                "It does not need to breathe, eat or sleep, and ignores effects that would \
                 leave it {}.",
                monster.condition_immunities.join(", ").to_lowercase()
            )
        };
        Feature::passive("Undead Nature", immune)
    }

    /// Leads with the source rule so the reaction outranks the plain passive
    /// the base stage makes from the same trait.
    fn fortitude(ctx: &SpecializationContext<'_>) -> Option<Feature> {
        let source = ctx.monster.find_trait("undead fortitude")?;
        let lead = text::first_sentences(&source.description, 1);
        let (mechanic, cost) = if ctx.classification.archetype == Archetype::Minion {
            (
                "Spend a Fear to keep this Minion standing instead.",
                Cost::Fear(1),
            )
        } else {
            (
                "Mark a Stress to mark 1 HP instead of the HP the damage would deal. \
                 This does not work against magic damage dealt by a radiant or holy source, \
                 or against a critical success.",
                Cost::Stress(1),
            )
        };
        Some(
            Feature::reaction("Undead Fortitude", format!("{} {}", lead, mechanic))
                .with_trigger("When this adversary would mark its last HP")
                .with_cost(cost),
        )
    }

    fn life_drain(ctx: &SpecializationContext<'_>) -> Option<Feature> {
        let (name, description) = ctx
            .monster
            .ability_texts()
            .into_iter()
            .find(|(n, d)| {
                let haystack = format!("{} {}", n, d).to_lowercase();
                haystack.contains("life drain")
                    || (haystack.contains("necrotic")
                        && haystack.contains("hit point maximum is reduced"))
            })?;
        let mut feature = Feature::action(
            "Life Drain",
            format!(
                "On a successful {} attack, the target also marks a Stress and this \
                 adversary clears a HP.",
                text::strip_parenthetical(name)
            ),
        );
        let necrotic = text::damage_rolls(description)
            .into_iter()
            .find(|r| r.damage_type == DamageType::Necrotic);
        if let Some(roll) = necrotic {
            feature = feature.with_damage(tier_damage(&roll, ctx.refs).with_direct(true));
        }
        Some(feature)
    }

    fn incorporeal(monster: &Monster) -> Option<Feature> {
        monster.find_trait("incorporeal")?;
        Some(Feature::passive(
            "Incorporeal",
            "Moves through creatures and objects as if they were difficult terrain. \
             Resistant to physical damage.",
        ))
    }

    fn sunlight(monster: &Monster) -> Option<Feature> {
        monster.find_trait("sunlight")?;
        Some(
            Feature::passive(
                "Sunlight Sensitivity",
                "While in sunlight, this adversary's attacks are made with disadvantage.",
            )
            .with_conditions(vec!["Vulnerable".to_string()]),
        )
    }

    fn turn_resistance(monster: &Monster) -> Option<Feature> {
        monster.traits.iter().find(|t| {
            let lower = t.name.to_lowercase();
            lower.contains("turn resistance") || lower.contains("turn defiance")
        })?;
        Some(Feature::passive(
            "Turn Resistance",
            "Has advantage on reaction rolls against effects that turn or banish undead.",
        ))
    }

    fn radiant_weakness(monster: &Monster) -> Option<Feature> {
        let weak = monster
            .damage_vulnerabilities
            .iter()
            .any(|v| v.to_lowercase().contains("radiant"));
        if !weak {
            return None;
        }
        Some(Feature::passive(
            "Radiant Weakness",
            "Marks an additional HP when it takes damage from a radiant or holy source.",
        ))
    }
}

impl Specialization for Undead {
    fn name(&self) -> &'static str {
        "undead"
    }

    fn detect(&self, monster: &Monster) -> bool {
        monster.creature_type == CreatureType::Undead
    }

    fn convert(&self, ctx: &SpecializationContext<'_>) -> SpecializationOutput {
        let monster = ctx.monster;
        let mut features = vec![Self::nature(monster)];
        features.extend(Self::fortitude(ctx));
        features.extend(Self::life_drain(ctx));
        features.extend(Self::incorporeal(monster));
        features.extend(Self::sunlight(monster));
        features.extend(Self::turn_resistance(monster));
        features.extend(Self::radiant_weakness(monster));

        SpecializationOutput {
            features,
            bonus_stress: 0,
            attacks: None,
        }
    }
}
