//! Keyword and pattern miners over stat-block prose.
//!
//! These only read text; none of them know about tiers or archetypes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::monster::{Ability, DamageRoll, DamageType};

static DAMAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\((\d+)\s*d\s*(\d+)(?:\s*([+\-−])\s*(\d+))?\)\s*([a-z]+)\s+damage")
        .expect("damage pattern compiles")
});

static SAVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)DC\s*(\d+)\s+(strength|dexterity|constitution|intelligence|wisdom|charisma)",
    )
    .expect("save pattern compiles")
});

static COST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)costs?\s+(\d+)\s+actions?").expect("cost pattern compiles"));

static AREA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)[- ]foot").expect("area pattern compiles"));

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)").expect("parenthetical pattern compiles"));

/// Every `(XdY + Z) <type> damage` group in `text`, in order.
pub fn damage_rolls(text: &str) -> Vec<DamageRoll> {
    DAMAGE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let count = caps.get(1)?.as_str().parse().ok()?;
            let sides = caps.get(2)?.as_str().parse().ok()?;
            let sign = caps.get(3).map(|m| m.as_str()).unwrap_or("+");
            let magnitude: i32 = caps
                .get(4)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            let modifier = if sign == "+" { magnitude } else { -magnitude };
            let damage_type = DamageType::parse(caps.get(5)?.as_str())?;
            Some(DamageRoll::new(count, sides, modifier, damage_type))
        })
        .collect()
}

pub fn first_damage_roll(text: &str) -> Option<DamageRoll> {
    damage_rolls(text).into_iter().next()
}

/// `DC 15 Dexterity` → `(15, Dex)`.
pub fn save_dc(text: &str) -> Option<(i32, Ability)> {
    let caps = SAVE_PATTERN.captures(text)?;
    let dc = caps.get(1)?.as_str().parse().ok()?;
    let ability = Ability::parse(caps.get(2)?.as_str())?;
    Some((dc, ability))
}

/// `Wing Attack (Costs 2 Actions)` → `2`.
pub fn legendary_cost(text: &str) -> Option<u8> {
    COST_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Largest `N-foot` measurement in `text` (cone length, line length...).
pub fn area_feet(text: &str) -> Option<u32> {
    AREA_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .max()
}

/// Leading count in a multiattack line ("makes three attacks" → 3).
pub fn attack_count(text: &str) -> u32 {
    let lower = text.to_lowercase();
    const WORDS: &[(&str, u32)] = &[
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
    ];
    WORDS
        .iter()
        .filter_map(|(word, n)| lower.find(&format!("{} ", word)).map(|pos| (pos, *n)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, n)| n)
        .unwrap_or(2)
}

/// Recharge and per-day limits on an ability name.
pub fn is_limited_use(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("recharge") || lower.contains("/day") || lower.contains("per day")
}

/// Drop `(Recharge 5–6)`-style suffixes from an ability name.
pub fn strip_parenthetical(name: &str) -> String {
    PARENTHETICAL.replace_all(name, "").trim().to_string()
}

pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

pub fn count_matches(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().filter(|n| haystack.contains(*n)).count()
}

const RESTRAINED_WORDS: &[&str] = &["restrained", "grappled", "paralyzed", "stunned", "petrified"];
const VULNERABLE_WORDS: &[&str] = &[
    "frightened",
    "poisoned",
    "prone",
    "blinded",
    "charmed",
    "deafened",
    "incapacitated",
];
const HIDDEN_WORDS: &[&str] = &["invisible"];

/// Target conditions implied by 5e condition keywords, deduplicated in the
/// order Restrained, Vulnerable, Hidden.
pub fn conditions_in(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut out = Vec::new();
    if contains_any(&lower, RESTRAINED_WORDS) {
        out.push("Restrained".to_string());
    }
    if contains_any(&lower, VULNERABLE_WORDS) {
        out.push("Vulnerable".to_string());
    }
    if contains_any(&lower, HIDDEN_WORDS) {
        out.push("Hidden".to_string());
    }
    out
}

/// Leading clause of a reaction ("When a creature hits ..., the knight ...").
pub fn first_clause(text: &str) -> String {
    let trimmed = text.trim();
    let end = trimmed.find(&[',', '.'][..]).unwrap_or(trimmed.len());
    trimmed[..end].trim().to_string()
}

/// First `n` sentences of `text`.
pub fn first_sentences(text: &str, n: usize) -> String {
    let mut out = String::new();
    let mut taken = 0;
    for piece in text.split_inclusive(". ") {
        out.push_str(piece);
        taken += 1;
        if taken >= n {
            break;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_typed_damage_groups() {
        let rolls = damage_rolls(
            "Hit: 19 (2d10 + 8) piercing damage plus 7 (2d6) fire damage.",
        );
        assert_eq!(rolls.len(), 2);
        assert_eq!(rolls[0], DamageRoll::new(2, 10, 8, DamageType::Piercing));
        assert_eq!(rolls[1], DamageRoll::new(2, 6, 0, DamageType::Fire));
    }

    #[test]
    fn reads_save_dc() {
        assert_eq!(
            save_dc("must make a DC 21 Dexterity saving throw"),
            Some((21, Ability::Dex))
        );
        assert_eq!(save_dc("no save here"), None);
    }

    #[test]
    fn reads_legendary_cost_and_strips_suffix() {
        assert_eq!(legendary_cost("Wing Attack (Costs 2 Actions)"), Some(2));
        assert_eq!(legendary_cost("Detect"), None);
        assert_eq!(strip_parenthetical("Fire Breath (Recharge 5–6)"), "Fire Breath");
    }

    #[test]
    fn maps_condition_keywords() {
        assert_eq!(
            conditions_in("the target is grappled and frightened"),
            vec!["Restrained".to_string(), "Vulnerable".to_string()]
        );
        assert!(conditions_in("plain text").is_empty());
    }

    #[test]
    fn area_and_attack_count() {
        assert_eq!(area_feet("exhales fire in a 60-foot cone"), Some(60));
        assert_eq!(area_feet("a 90-foot line that is 10 feet wide"), Some(90));
        assert_eq!(
            attack_count("The dragon makes three attacks: one with its bite and two with its claws."),
            3
        );
        assert_eq!(attack_count("The ogre attacks with its club"), 2);
    }

    #[test]
    fn first_clause_stops_at_comma() {
        assert_eq!(
            first_clause("When a creature hits the knight, it parries."),
            "When a creature hits the knight"
        );
    }
}
