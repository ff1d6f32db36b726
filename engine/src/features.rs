//! Base feature conversion and feature merging.

use indexmap::IndexMap;
use tracing::trace;

use crate::adversary::{Cost, Feature};
use crate::attacks::tier_damage;
use crate::monster::{DamageType, Monster};
use crate::tables::TierReference;
use crate::text;

/// Bonus a feature earns in [`detail_score`] for carrying damage.
pub const DAMAGE_DETAIL_BONUS: usize = 50;

/// Description length, plus a flat bonus when damage is embedded.
pub fn detail_score(feature: &Feature) -> usize {
    let bonus = if feature.damage.is_some() {
        DAMAGE_DETAIL_BONUS
    } else {
        0
    };
    feature.description.chars().count() + bonus
}

/// Concatenate feature lists and collapse case-sensitive name collisions.
///
/// The survivor of a collision is the one with the higher detail score; a
/// tie keeps the earlier feature. Survivors hold the position of the first
/// feature with their name.
pub fn merge_features<I>(lists: I) -> Vec<Feature>
where
    I: IntoIterator<Item = Vec<Feature>>,
{
    let mut merged: IndexMap<String, Feature> = IndexMap::new();
    for feature in lists.into_iter().flatten() {
        match merged.get_mut(&feature.name) {
            Some(existing) => {
                let (old, new) = (detail_score(existing), detail_score(&feature));
                trace!(name = %feature.name, old, new, "feature name collision");
                if new > old {
                    *existing = feature;
                }
            }
            None => {
                merged.insert(feature.name.clone(), feature);
            }
        }
    }
    merged.into_values().collect()
}

fn condensed(description: &str) -> String {
    text::first_sentences(description, 1)
}

pub fn convert_traits(monster: &Monster, refs: &TierReference) -> Vec<Feature> {
    monster
        .traits
        .iter()
        .map(|t| {
            let mut feature = Feature::passive(text::strip_parenthetical(&t.name), condensed(&t.description))
                .with_conditions(text::conditions_in(&t.description));
            if let Some(roll) = text::first_damage_roll(&t.description) {
                feature = feature.with_damage(tier_damage(&roll, refs));
            }
            feature
        })
        .collect()
}

/// Actions that are not attacks. Recharge and per-day limits become a
/// Stress cost.
pub fn convert_actions(monster: &Monster, refs: &TierReference) -> Vec<Feature> {
    monster
        .actions
        .iter()
        .filter(|a| a.attack.is_none() && !a.name.eq_ignore_ascii_case("multiattack"))
        .map(|a| {
            let mut feature = Feature::action(text::strip_parenthetical(&a.name), condensed(&a.description))
                .with_conditions(text::conditions_in(&a.description));
            if text::is_limited_use(&a.name) {
                feature = feature.with_cost(Cost::Stress(1));
            }
            if let Some(roll) = text::first_damage_roll(&a.description) {
                feature = feature.with_damage(tier_damage(&roll, refs));
            }
            feature
        })
        .collect()
}

pub fn convert_reactions(monster: &Monster) -> Vec<Feature> {
    monster
        .reactions
        .iter()
        .map(|r| {
            Feature::reaction(text::strip_parenthetical(&r.name), condensed(&r.description))
                .with_trigger(text::first_clause(&r.description))
                .with_conditions(text::conditions_in(&r.description))
        })
        .collect()
}

fn damage_words(entries: &[String]) -> (bool, Vec<String>) {
    let mut physical = false;
    let mut magic = Vec::new();
    for entry in entries {
        let lower = entry.to_lowercase();
        for word in lower.split(|c: char| !c.is_alphabetic()) {
            match DamageType::parse(word) {
                Some(t) if t.is_physical() => physical = true,
                Some(t) => {
                    let name = t.as_str().to_string();
                    if !magic.contains(&name) {
                        magic.push(name);
                    }
                }
                None => {}
            }
        }
    }
    (physical, magic)
}

/// Resistance and immunity summaries.
pub fn convert_defenses(monster: &Monster) -> Vec<Feature> {
    let mut out = Vec::new();

    let (phys_immune, magic_immune) = damage_words(&monster.damage_immunities);
    let (phys_resist, magic_resist) = damage_words(&monster.damage_resistances);

    if phys_immune {
        out.push(Feature::passive(
            "Physical Immunity",
            "Immune to physical damage from mundane sources.",
        ));
    } else if phys_resist {
        out.push(Feature::passive(
            "Physical Resistance",
            "Resistant to physical damage from mundane sources.",
        ));
    }
    if !magic_immune.is_empty() {
        out.push(Feature::passive(
            "Elemental Immunity",
            format!("Immune to {} damage.", magic_immune.join(", ")),
        ));
    }
    if !magic_resist.is_empty() {
        out.push(Feature::passive(
            "Elemental Resistance",
            format!("Resistant to {} damage.", magic_resist.join(", ")),
        ));
    }
    out
}

/// Every base feature in stat-block order: traits, actions, reactions, then
/// defenses.
pub fn base_features(monster: &Monster, refs: &TierReference) -> Vec<Feature> {
    let mut out = convert_traits(monster, refs);
    out.extend(convert_actions(monster, refs));
    out.extend(convert_reactions(monster));
    out.extend(convert_defenses(monster));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_words_split_physical_and_magic() {
        let entries = vec![
            "fire".to_string(),
            "bludgeoning, piercing, and slashing from nonmagical attacks".to_string(),
        ];
        let (physical, magic) = damage_words(&entries);
        assert!(physical);
        assert_eq!(magic, vec!["fire".to_string()]);
    }
}
