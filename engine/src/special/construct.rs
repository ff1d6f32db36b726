//! Constructs and oozes.

use crate::adversary::{Cost, DamageKind, Feature};
use crate::attacks::damage_kind;
use crate::monster::{CreatureType, DamageType, Monster};
use crate::text;

use super::{Specialization, SpecializationContext, SpecializationOutput};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructOoze;

impl ConstructOoze {
    fn construct_features(monster: &Monster) -> Vec<Feature> {
        let mut out = vec![Feature::passive(
            "Construct Nature",
            "It does not need to breathe, eat, drink or sleep, and cannot be Vulnerable \
             from fear, charm or poison.",
        )];
        if monster.has_trait("immutable form") {
            out.push(Feature::passive(
                "Immutable Form",
                "Immune to any effect that would alter its form.",
            ));
        }
        if monster.has_trait("magic resistance") {
            out.push(Feature::passive(
                "Magic Resistance",
                "Has advantage on reaction rolls against spells and other magical effects.",
            ));
        }
        if monster.has_trait("antimagic susceptibility") {
            out.push(Feature::passive(
                "Antimagic Susceptibility",
                "Inside an area that suppresses magic, it is Vulnerable and cannot act.",
            ));
        }
        if monster.has_trait("berserk") {
            out.push(
                Feature::passive(
                    "Berserk",
                    "Once it has marked half its HP, it attacks the nearest creature, \
                     friend or foe.",
                ),
            );
        }
        out.extend(Self::absorption(monster));
        out
    }

    /// `Fire Absorption`, `Lightning Absorption` and the like.
    fn absorption(monster: &Monster) -> Option<Feature> {
        let source = monster
            .traits
            .iter()
            .find(|t| t.name.to_lowercase().contains("absorption"))?;
        let element = source
            .name
            .split_whitespace()
            .next()
            .and_then(DamageType::parse)
            .filter(|t| damage_kind(*t) == DamageKind::Magic)?;
        Some(Feature::passive(
            text::strip_parenthetical(&source.name),
            format!(
                "Whenever it would take {} damage, it takes no damage and clears HP equal \
                 to the HP that damage would have marked.",
                element.as_str()
            ),
        ))
    }

    fn ooze_features(monster: &Monster) -> Vec<Feature> {
        let mut out = Vec::new();
        if monster.has_trait("amorphous") {
            out.push(Feature::passive(
                "Amorphous",
                "Can move through a space as narrow as one inch wide without squeezing.",
            ));
        }
        let corrosive = monster.has_trait("corrode")
            || monster.has_trait("corrosive")
            || monster
                .ability_texts()
                .iter()
                .any(|(_, d)| d.to_lowercase().contains("corrodes"));
        if corrosive {
            out.push(
                Feature::passive(
                    "Corrosive Form",
                    "A creature that touches it or hits it with a melee attack takes acid damage. \
                     Nonmagical weapons that hit it corrode and mark a durability loss.",
                ),
            );
        }
        let split = monster
            .reactions
            .iter()
            .any(|r| r.name.to_lowercase().contains("split"));
        if split {
            out.push(
                Feature::reaction(
                    "Split",
                    "Split into two smaller copies, dividing its remaining HP between them.",
                )
                .with_trigger("When this adversary takes physical damage and has at least 2 HP left")
                .with_cost(Cost::Stress(1)),
            );
        }
        if monster.has_trait("spider climb") || monster.speed.climb > 0 {
            out.push(Feature::passive(
                "Spider Climb",
                "Can climb difficult surfaces, including ceilings, without needing to roll.",
            ));
        }
        let blindsight = monster
            .senses
            .iter()
            .any(|s| s.to_lowercase().contains("blindsight"));
        if blindsight {
            out.push(Feature::passive(
                "Blindsight",
                "Perceives its surroundings without sight within Close range and cannot be \
                 hidden from there.",
            ));
        }
        out
    }
}

impl Specialization for ConstructOoze {
    fn name(&self) -> &'static str {
        "construct-ooze"
    }

    fn detect(&self, monster: &Monster) -> bool {
        matches!(
            monster.creature_type,
            CreatureType::Construct | CreatureType::Ooze
        )
    }

    fn convert(&self, ctx: &SpecializationContext<'_>) -> SpecializationOutput {
        let features = match ctx.monster.creature_type {
            CreatureType::Construct => Self::construct_features(ctx.monster),
            _ => Self::ooze_features(ctx.monster),
        };
        SpecializationOutput {
            features,
            bonus_stress: 0,
            attacks: None,
        }
    }
}
