//! Multiattack, legendary, mythic and lair abilities.

use crate::adversary::{Cost, Feature};
use crate::attacks::tier_damage;
use crate::monster::Monster;
use crate::text;

use super::{Specialization, SpecializationContext, SpecializationOutput};

#[derive(Debug, Clone, Copy, Default)]
pub struct MultiattackLegendary;

impl MultiattackLegendary {
    fn legendary_features(ctx: &SpecializationContext<'_>) -> Vec<Feature> {
        ctx.monster
            .legendary_actions
            .iter()
            .map(|la| {
                let cost = text::legendary_cost(&la.name).unwrap_or(la.cost).max(1);
                let mut feature = Feature::action(
                    text::strip_parenthetical(&la.name),
                    format!(
                        "Legendary. Usable outside this adversary's own spotlight. {}",
                        la.description.trim()
                    ),
                )
                .with_cost(Cost::Stress(cost))
                .with_conditions(text::conditions_in(&la.description));
                if let Some(roll) = text::first_damage_roll(&la.description) {
                    feature = feature.with_damage(tier_damage(&roll, ctx.refs));
                }
                feature
            })
            .collect()
    }

    fn legendary_resistance(monster: &Monster) -> Option<Feature> {
        let source = monster.find_trait("legendary resistance")?;
        let uses = source
            .name
            .chars()
            .find(|c| c.is_ascii_digit())
            .and_then(|c| c.to_digit(10))
            .unwrap_or(3);
        Some(
            Feature::reaction(
                "Legendary Resistance",
                format!(
                    "Mark a Stress to succeed on a failed reaction roll instead. \
                     Usable {} times per scene.",
                    uses
                ),
            )
            .with_trigger("When this adversary fails a reaction roll")
            .with_cost(Cost::Stress(1)),
        )
    }

    fn mythic_features(monster: &Monster) -> Vec<Feature> {
        monster
            .mythic_actions
            .iter()
            .map(|m| {
                Feature::action(
                    text::strip_parenthetical(&m.name),
                    format!("Mythic. Once this adversary is reduced below half its HP: {}", m.description.trim()),
                )
                .with_cost(Cost::Fear(1))
                .with_conditions(text::conditions_in(&m.description))
            })
            .collect()
    }

    fn lair_feature(monster: &Monster) -> Option<Feature> {
        if monster.lair_actions.is_empty() {
            return None;
        }
        let options = monster
            .lair_actions
            .iter()
            .map(|l| format!("{}: {}", l.name, text::first_sentences(&l.description, 1)))
            .collect::<Vec<_>>()
            .join(" ");
        Some(
            Feature::action(
                "Lair",
                format!("While fighting in its lair, choose one lair effect. {}", options),
            )
            .with_cost(Cost::Fear(1)),
        )
    }

    fn flurry(monster: &Monster) -> Option<Feature> {
        let multi = monster.multiattack.as_deref()?;
        let count = text::attack_count(multi);
        if count < 2 {
            return None;
        }
        Some(
            Feature::action(
                "Flurry",
                format!(
                    "Make up to {} standard attacks this spotlight, each against a different \
                     target within range.",
                    count
                ),
            )
            .with_cost(Cost::Stress(1)),
        )
    }
}

impl Specialization for MultiattackLegendary {
    fn name(&self) -> &'static str {
        "legendary"
    }

    fn detect(&self, monster: &Monster) -> bool {
        monster.multiattack.is_some() || monster.is_legendary()
    }

    fn convert(&self, ctx: &SpecializationContext<'_>) -> SpecializationOutput {
        let legendary = Self::legendary_features(ctx);
        let bonus_stress = legendary.len() as u32;

        let mut features = legendary;
        features.extend(Self::legendary_resistance(ctx.monster));
        features.extend(Self::mythic_features(ctx.monster));
        features.extend(Self::lair_feature(ctx.monster));
        features.extend(Self::flurry(ctx.monster));

        SpecializationOutput {
            features,
            bonus_stress,
            attacks: None,
        }
    }
}
