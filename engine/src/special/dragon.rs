//! True dragons and other breath-weapon users.

use crate::adversary::{Attack, Cost, Feature, RangeBand};
use crate::attacks::{solo_damage_bonus, tier_damage};
use crate::monster::{CreatureType, Monster, MonsterAction};
use crate::text;

use super::{Specialization, SpecializationContext, SpecializationOutput};

const FAR_AREA_FEET: u32 = 60;

#[derive(Debug, Clone, Copy, Default)]
pub struct Dragon;

impl Dragon {
    fn action_named<'m>(monster: &'m Monster, needle: &str) -> Option<&'m MonsterAction> {
        monster
            .actions
            .iter()
            .find(|a| a.name.to_lowercase().contains(needle))
    }

    fn reaction_roll(description: &str) -> String {
        match text::save_dc(description) {
            Some((dc, ability)) => format!(
                "Each target in the area makes a Reaction Roll ({}, difficulty {}).",
                ability.reaction_trait(),
                dc
            ),
            None => "Each target in the area makes a Reaction Roll (Agility).".to_string(),
        }
    }

    fn breath(ctx: &SpecializationContext<'_>) -> Option<Feature> {
        let action = Self::action_named(ctx.monster, "breath")?;
        let range = match text::area_feet(&action.description) {
            Some(feet) if feet >= FAR_AREA_FEET => RangeBand::Far,
            _ => RangeBand::Close,
        };
        let mut description = format!(
            "Spend a Fear to unleash a breath weapon across a {} area. {}",
            range,
            Self::reaction_roll(&action.description)
        );
        let mut feature = Feature::action(text::strip_parenthetical(&action.name), String::new())
            .with_cost(Cost::Fear(1))
            .with_conditions(text::conditions_in(&action.description));
        if let Some(roll) = text::first_damage_roll(&action.description) {
            let mut damage = tier_damage(&roll, ctx.refs);
            damage.modifier = solo_damage_bonus(ctx.classification.archetype, ctx.tier);
            description.push_str(&format!(
                " Targets who fail take {}; targets who succeed take half.",
                damage
            ));
            feature = feature.with_damage(damage);
        }
        feature.description = description;
        Some(feature)
    }

    fn frightful_presence(monster: &Monster) -> Option<Feature> {
        let action = Self::action_named(monster, "frightful presence")?;
        Some(
            Feature::action(
                "Frightful Presence",
                format!(
                    "Spend a Fear to terrify every target within Far range. {} Targets who fail \
                     are Vulnerable until they clear a Stress.",
                    Self::reaction_roll(&action.description).replace("in the area ", "")
                ),
            )
            .with_cost(Cost::Fear(1))
            .with_conditions(vec!["Vulnerable".to_string()]),
        )
    }

    fn flight(monster: &Monster) -> Option<Feature> {
        if monster.speed.fly == 0 {
            return None;
        }
        Some(Feature::passive(
            "Flight",
            "Can fly. While airborne, attackers without reach or ranged attacks cannot target it.",
        ))
    }

    /// Base attacks with the Bite leading; the multiattack note follows the
    /// attack that leads.
    fn enhanced_attacks(attacks: &[Attack]) -> Option<Vec<Attack>> {
        let bite = attacks
            .iter()
            .position(|a| a.name.to_lowercase().contains("bite"))?;
        if bite == 0 {
            return None;
        }
        let mut out = attacks.to_vec();
        let multi: Vec<String> = out[0]
            .effects
            .iter()
            .filter(|e| e.starts_with("Multiattack:"))
            .cloned()
            .collect();
        out[0].effects.retain(|e| !e.starts_with("Multiattack:"));
        let mut lead = out.remove(bite);
        lead.effects.extend(multi);
        out.insert(0, lead);
        Some(out)
    }
}

impl Specialization for Dragon {
    fn name(&self) -> &'static str {
        "dragon"
    }

    fn detect(&self, monster: &Monster) -> bool {
        monster.creature_type == CreatureType::Dragon
    }

    fn convert(&self, ctx: &SpecializationContext<'_>) -> SpecializationOutput {
        let mut features = Vec::new();
        features.extend(Self::breath(ctx));
        features.extend(Self::frightful_presence(ctx.monster));
        features.extend(Self::flight(ctx.monster));

        SpecializationOutput {
            features,
            bonus_stress: 0,
            attacks: Self::enhanced_attacks(ctx.attacks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adversary::{DamageExpr, DamageKind, DieSize};

    fn attack(name: &str, effects: &[&str]) -> Attack {
        Attack {
            name: name.to_string(),
            modifier: 5,
            range: RangeBand::VeryClose,
            damage: DamageExpr::new(1, DieSize::D8, 0, DamageKind::Physical),
            effects: effects.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn bite_moves_to_front_with_multiattack_note() {
        let attacks = vec![
            attack("Claw", &["Multiattack: bite and two claws"]),
            attack("Bite", &[]),
            attack("Tail", &[]),
        ];
        let out = Dragon::enhanced_attacks(&attacks).unwrap();
        assert_eq!(out[0].name, "Bite");
        assert_eq!(out[0].effects, vec!["Multiattack: bite and two claws".to_string()]);
        assert!(out[1].effects.is_empty());
        assert_eq!(out[2].name, "Tail");
    }

    #[test]
    fn bite_already_first_keeps_base_list() {
        let attacks = vec![attack("Bite", &[]), attack("Claw", &[])];
        assert!(Dragon::enhanced_attacks(&attacks).is_none());
    }
}
