//! Experiences, motives and description for a converted adversary.
//!
//! Selection is seeded; the same seed and source always pick the same
//! topics. Nothing here feeds back into the numeric stats.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::adversary::{Archetype, Classification, Experience, Narrative, Tier};
use crate::monster::{CreatureType, Monster};
use crate::text;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const MAX_EXPERIENCES: usize = 2;
const MAX_MOTIVES: usize = 4;

/// Default seed for a monster: FNV-1a over its name.
pub fn seed_from_name(name: &str) -> u64 {
    name.bytes().fold(FNV_OFFSET, |hash, b| {
        (hash ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

fn skill_experience(skill: &str) -> Option<&'static str> {
    let topic = match skill.to_lowercase().as_str() {
        "stealth" => "Ambush",
        "perception" => "Keen Senses",
        "athletics" => "Overpower",
        "acrobatics" => "Nimble",
        "arcana" => "Arcane Lore",
        "deception" => "Deceive",
        "insight" => "Read Intentions",
        "intimidation" => "Intimidate",
        "persuasion" => "Silver Tongue",
        "survival" => "Tracker",
        "history" => "Ancient Lore",
        "religion" => "Divine Lore",
        "nature" => "Wilderness Lore",
        "medicine" => "Field Medic",
        "sleight of hand" => "Pickpocket",
        "investigation" => "Investigator",
        _ => return None,
    };
    Some(topic)
}

fn type_experiences(creature_type: CreatureType) -> &'static [&'static str] {
    match creature_type {
        CreatureType::Aberration => &["Alien Mind", "Unsettling Presence"],
        CreatureType::Beast => &["Hunter", "Pack Instincts", "Territorial"],
        CreatureType::Celestial => &["Divine Mandate", "Radiant Lore"],
        CreatureType::Construct => &["Tireless Guardian", "Programmed Duty"],
        CreatureType::Dragon => &["Ancient Knowledge", "Hoard Keeper", "Aerial Predator"],
        CreatureType::Elemental => &["Elemental Fury", "Primal Force"],
        CreatureType::Fey => &["Trickery", "Glamour"],
        CreatureType::Fiend => &["Infernal Bargains", "Cruelty"],
        CreatureType::Giant => &["Crushing Strength", "Mountain Lore"],
        CreatureType::Humanoid => &["Streetwise", "Soldier", "Survivor"],
        CreatureType::Monstrosity => &["Apex Predator", "Lurker"],
        CreatureType::Ooze => &["Dungeon Scavenger", "Patient Hunter"],
        CreatureType::Plant => &["Rooted", "Overgrowth"],
        CreatureType::Undead => &["Deathless", "Grave Knowledge", "Hunger for Life"],
    }
}

fn archetype_motives(archetype: Archetype) -> &'static [&'static str] {
    match archetype {
        Archetype::Minion => &["overwhelm with numbers", "follow orders", "flee when alone"],
        Archetype::Standard => &["defend territory", "seize an advantage", "guard"],
        Archetype::Bruiser => &["smash through defenses", "charge the nearest foe", "intimidate"],
        Archetype::Ranged => &["keep distance", "pick off the wounded", "find high ground"],
        Archetype::Skulk => &["strike from the shadows", "isolate a target", "slip away"],
        Archetype::Support => &["bolster allies", "heal the fallen", "hang back"],
        Archetype::Leader => &["command the field", "rally allies", "demand tribute"],
        Archetype::Horde => &["surround", "swarm the weak", "pile on"],
        Archetype::Solo => &["dominate the battlefield", "punish the bold", "protect its lair"],
        Archetype::Social => &["negotiate", "manipulate", "gather secrets"],
        Archetype::Swarm => &["engulf", "spread out", "consume"],
    }
}

fn type_motives(creature_type: CreatureType) -> &'static [&'static str] {
    match creature_type {
        CreatureType::Beast => &["hunt", "feed"],
        CreatureType::Dragon => &["hoard treasure", "assert dominance"],
        CreatureType::Undead => &["consume the living", "serve a dark master"],
        CreatureType::Construct => &["obey its creator", "guard a post"],
        CreatureType::Ooze => &["dissolve", "absorb"],
        CreatureType::Fiend => &["corrupt", "collect souls"],
        CreatureType::Humanoid => &["plunder", "survive"],
        CreatureType::Giant => &["raid", "crush the small"],
        _ => &["protect what it values", "drive off intruders"],
    }
}

pub fn experience_bonus(tier: Tier) -> i32 {
    if tier.get() <= 2 { 2 } else { 3 }
}

fn description(monster: &Monster, classification: &Classification) -> String {
    let lead = monster
        .traits
        .first()
        .map(|t| text::first_sentences(&t.description, 1))
        .filter(|s| !s.is_empty());
    let base = format!(
        "A {} {} that fights as a {}.",
        monster.size.to_string().to_lowercase(),
        monster.creature_type,
        classification.archetype.as_str().to_lowercase()
    );
    match lead {
        Some(lead) => format!("{} {}", base, lead),
        None => base,
    }
}

/// Build the narrative block. Skill-backed experiences come first, then
/// creature-type topics fill the remaining slots.
pub fn generate(
    monster: &Monster,
    classification: &Classification,
    tier: Tier,
    seed: u64,
) -> Narrative {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let bonus = experience_bonus(tier);

    let mut topics: Vec<&str> = monster
        .skills
        .keys()
        .filter_map(|k| skill_experience(k))
        .collect();
    topics.dedup();
    topics.truncate(MAX_EXPERIENCES);
    if topics.len() < MAX_EXPERIENCES {
        let need = MAX_EXPERIENCES - topics.len();
        let fill: Vec<&str> = type_experiences(monster.creature_type)
            .choose_multiple(&mut rng, need)
            .copied()
            .collect();
        topics.extend(fill);
    }
    let experiences = topics
        .into_iter()
        .map(|name| Experience {
            name: name.to_string(),
            bonus,
        })
        .collect();

    let pool: Vec<&str> = archetype_motives(classification.archetype)
        .iter()
        .chain(type_motives(monster.creature_type))
        .copied()
        .collect();
    let motives_tactics = pool
        .choose_multiple(&mut rng, MAX_MOTIVES)
        .map(|m| m.to_string())
        .collect();

    Narrative {
        description: description(monster, classification),
        motives_tactics,
        experiences,
        design_notes: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(seed_from_name(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(seed_from_name("a"), 0xaf63_dc4c_8601_ec8c);
    }
}
