//! Evasion, difficulty, thresholds, HP and base Stress.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adversary::{Archetype, Classification, Difficulty, Thresholds, Tier};
use crate::monster::Monster;
use crate::tables::TierReference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreStats {
    pub evasion: i32,
    pub difficulty: Difficulty,
    pub thresholds: Thresholds,
    pub hp: u32,
    /// Before specialization bonuses.
    pub stress: u32,
}

/// `floor(AC × 0.8) + tier`.
pub fn evasion(armor_class: i32, tier: Tier) -> i32 {
    (armor_class * 4).div_euclid(5) + tier.as_i32()
}

pub fn difficulty(archetype: Archetype, cr: f64, tier: Tier) -> Difficulty {
    match archetype {
        Archetype::Minion => Difficulty::Minor,
        Archetype::Standard => {
            if cr < (tier.as_i32() * 3) as f64 {
                Difficulty::Minor
            } else {
                Difficulty::Major
            }
        }
        Archetype::Solo | Archetype::Leader => Difficulty::Severe,
        _ => Difficulty::Major,
    }
}

pub fn thresholds(tier: Tier, difficulty: Difficulty, refs: &TierReference) -> Thresholds {
    refs.threshold_formula(difficulty).apply(tier)
}

pub fn hit_points(archetype: Archetype, source_hp: i32, tier: Tier) -> u32 {
    let t = tier.get() as u32;
    let source = source_hp.max(0) as u32;
    match archetype {
        Archetype::Minion => 1,
        Archetype::Solo => (source / 8).max(4 * t),
        _ => (source / 10).max(2 * t),
    }
}

pub fn base_stress(archetype: Archetype, tier: Tier) -> u32 {
    let t = tier.get() as u32;
    match archetype {
        Archetype::Minion => 0,
        Archetype::Solo => 2 * t,
        _ => t,
    }
}

/// Final Stress once specialization bonuses are known. Minions never carry
/// Stress.
pub fn total_stress(archetype: Archetype, base: u32, bonuses: u32) -> u32 {
    if archetype == Archetype::Minion {
        0
    } else {
        base + bonuses
    }
}

pub fn derive(
    monster: &Monster,
    tier: Tier,
    classification: &Classification,
    refs: &TierReference,
) -> CoreStats {
    let archetype = classification.archetype;
    let difficulty = difficulty(archetype, monster.cr(), tier);
    let stats = CoreStats {
        evasion: evasion(monster.armor_class, tier),
        difficulty,
        thresholds: thresholds(tier, difficulty, refs),
        hp: hit_points(archetype, monster.hit_points.average, tier),
        stress: base_stress(archetype, tier),
    };
    debug!(
        evasion = stats.evasion,
        hp = stats.hp,
        stress = stats.stress,
        thresholds = %stats.thresholds,
        "derived core stats for {}",
        monster.name
    );
    stats
}
