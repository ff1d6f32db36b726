pub mod adversary;
pub mod api;
pub mod attacks;
pub mod balance;
pub mod classify;
pub mod config;
pub mod content;
pub mod error;
pub mod features;
pub mod format;
pub mod monster;
pub mod narrative;
pub mod pipeline;
pub mod scaling;
pub mod special;
pub mod stats;
pub mod tables;
pub mod text;
pub mod tier;

pub use adversary::{
    Adversary, Archetype, Attack, Classification, CombatRole, Cost, DamageExpr, DamageKind,
    Difficulty, DieSize, Feature, FeatureKind, RangeBand, Thresholds, Tier,
};
pub use config::{ConvertOptions, OutputFormat, Verbosity};
pub use error::{ConvertError, ConvertResult};
pub use monster::{Ability, AbilityScores, ChallengeRating, CreatureType, DamageType, Monster, Size};
pub use pipeline::{convert, Pipeline};
pub use scaling::{quick_adjust, rescale_difficulty, rescale_tier, Preset};
pub use tables::TierReference;
pub use tier::tier_for_cr;

/* ---------------- helpers ---------------- */

/// D&D ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_mod(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2)
}
