//! Reference tables every formula reads from.
//!
//! A [`TierReference`] is built once (normally [`TierReference::standard`])
//! and passed by shared reference into each stage. Nothing in the crate
//! mutates it after construction.

use serde::{Deserialize, Serialize};

use crate::adversary::{Archetype, DamageKind, DamageExpr, DieSize, Difficulty, Thresholds, Tier};

/// Inclusive numeric band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: i32,
    pub high: i32,
}

impl Band {
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) as f64 / 2.0
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

/// Which HP band applies to an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HpRole {
    Minion,
    Standard,
    Solo,
}

impl HpRole {
    pub fn for_archetype(archetype: Archetype) -> HpRole {
        match archetype {
            Archetype::Minion => HpRole::Minion,
            Archetype::Solo => HpRole::Solo,
            _ => HpRole::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRow {
    pub evasion_default: i32,
    pub evasion: Band,
    pub minor_threshold: Band,
    pub major_threshold: Band,
    pub severe_threshold: Band,
    pub hp_minion: Band,
    pub hp_standard: Band,
    pub hp_solo: Band,
    pub stress: Band,
    pub attack_modifier: i32,
    /// Relative size of a tier's damage dice pool.
    pub dice_pool: f64,
}

impl TierRow {
    pub fn hp(&self, role: HpRole) -> Band {
        match role {
            HpRole::Minion => self.hp_minion,
            HpRole::Standard => self.hp_standard,
            HpRole::Solo => self.hp_solo,
        }
    }
}

/// Average-damage ceiling and the dice it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiceStep {
    pub max_average: f64,
    pub count: u32,
    pub die: DieSize,
}

/// `minor = T + offset`, `major = 2T + 2·offset`, `severe = 3T + 3·offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdFormula {
    pub offset: i32,
}

impl ThresholdFormula {
    pub fn apply(&self, tier: Tier) -> Thresholds {
        let t = tier.as_i32();
        Thresholds::new(t + self.offset, 2 * t + 2 * self.offset, 3 * t + 3 * self.offset)
    }
}

/// Additive adjustments applied when moving an adversary onto a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyModifier {
    pub thresholds: [i32; 3],
    pub hp: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierReference {
    pub tiers: [TierRow; 4],
    /// Ascending breakpoints; averages above the last step use `overflow`.
    pub dice_steps: Vec<DiceStep>,
    pub overflow: DiceStep,
    pub minor_formula: ThresholdFormula,
    pub major_formula: ThresholdFormula,
    pub severe_formula: ThresholdFormula,
    pub minor_modifier: DifficultyModifier,
    pub major_modifier: DifficultyModifier,
    pub severe_modifier: DifficultyModifier,
}

impl Default for TierReference {
    fn default() -> Self {
        Self::standard()
    }
}

impl TierReference {
    pub fn standard() -> Self {
        Self {
            tiers: [
                TierRow {
                    evasion_default: 12,
                    evasion: Band::new(10, 14),
                    minor_threshold: Band::new(3, 5),
                    major_threshold: Band::new(6, 10),
                    severe_threshold: Band::new(9, 15),
                    hp_minion: Band::new(1, 1),
                    hp_standard: Band::new(3, 7),
                    hp_solo: Band::new(6, 12),
                    stress: Band::new(1, 4),
                    attack_modifier: 3,
                    dice_pool: 1.0,
                },
                TierRow {
                    evasion_default: 14,
                    evasion: Band::new(12, 16),
                    minor_threshold: Band::new(4, 6),
                    major_threshold: Band::new(8, 12),
                    severe_threshold: Band::new(12, 18),
                    hp_minion: Band::new(1, 1),
                    hp_standard: Band::new(5, 9),
                    hp_solo: Band::new(8, 16),
                    stress: Band::new(2, 6),
                    attack_modifier: 5,
                    dice_pool: 2.0,
                },
                TierRow {
                    evasion_default: 16,
                    evasion: Band::new(14, 18),
                    minor_threshold: Band::new(5, 7),
                    major_threshold: Band::new(10, 14),
                    severe_threshold: Band::new(15, 21),
                    hp_minion: Band::new(1, 1),
                    hp_standard: Band::new(7, 11),
                    hp_solo: Band::new(12, 24),
                    stress: Band::new(3, 8),
                    attack_modifier: 7,
                    dice_pool: 3.0,
                },
                TierRow {
                    evasion_default: 18,
                    evasion: Band::new(16, 20),
                    minor_threshold: Band::new(6, 8),
                    major_threshold: Band::new(12, 16),
                    severe_threshold: Band::new(18, 24),
                    hp_minion: Band::new(1, 1),
                    hp_standard: Band::new(9, 13),
                    hp_solo: Band::new(16, 40),
                    stress: Band::new(4, 12),
                    attack_modifier: 9,
                    dice_pool: 4.0,
                },
            ],
            dice_steps: vec![
                DiceStep {
                    max_average: 3.5,
                    count: 1,
                    die: DieSize::D6,
                },
                DiceStep {
                    max_average: 5.5,
                    count: 1,
                    die: DieSize::D8,
                },
                DiceStep {
                    max_average: 7.5,
                    count: 1,
                    die: DieSize::D10,
                },
                DiceStep {
                    max_average: 11.0,
                    count: 1,
                    die: DieSize::D12,
                },
            ],
            overflow: DiceStep {
                max_average: f64::MAX,
                count: 2,
                die: DieSize::D8,
            },
            minor_formula: ThresholdFormula { offset: 2 },
            major_formula: ThresholdFormula { offset: 3 },
            severe_formula: ThresholdFormula { offset: 4 },
            minor_modifier: DifficultyModifier {
                thresholds: [0, 0, 0],
                hp: 0,
            },
            major_modifier: DifficultyModifier {
                thresholds: [1, 2, 3],
                hp: 1,
            },
            severe_modifier: DifficultyModifier {
                thresholds: [2, 4, 6],
                hp: 3,
            },
        }
    }

    pub fn row(&self, tier: Tier) -> &TierRow {
        &self.tiers[tier.index()]
    }

    pub fn threshold_formula(&self, difficulty: Difficulty) -> ThresholdFormula {
        match difficulty {
            Difficulty::Minor => self.minor_formula,
            Difficulty::Major => self.major_formula,
            Difficulty::Severe => self.severe_formula,
        }
    }

    pub fn difficulty_modifier(&self, difficulty: Difficulty) -> DifficultyModifier {
        match difficulty {
            Difficulty::Minor => self.minor_modifier,
            Difficulty::Major => self.major_modifier,
            Difficulty::Severe => self.severe_modifier,
        }
    }

    /// First step whose ceiling is at or above `average`.
    pub fn dice_for_average(&self, average: f64) -> DiceStep {
        self.dice_steps
            .iter()
            .copied()
            .find(|step| average <= step.max_average)
            .unwrap_or(self.overflow)
    }

    /// Generic damage used when a source monster offers nothing to convert.
    pub fn default_damage(&self, tier: Tier) -> DamageExpr {
        let pool = self.row(tier).dice_pool.round().max(1.0) as u32;
        DamageExpr::new(pool, DieSize::D6, 0, DamageKind::Physical)
    }
}
