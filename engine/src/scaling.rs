//! Retuning an assembled adversary.
//!
//! Every operation here returns a new record. Tier rescaling is anchored to
//! the reference table ranges and is lossy: rescaling up and back down need
//! not land on the original numbers.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::adversary::{
    Adversary, Archetype, Attack, Cost, DamageExpr, Difficulty, Feature, HordeInfo, Thresholds,
    Tier,
};
use crate::error::{ConvertError, ConvertResult};
use crate::narrative::experience_bonus;
use crate::pipeline::{
    horde_feature, minion_features, minion_step, relentless_count, relentless_feature,
};
use crate::tables::{Band, HpRole, TierReference};

/// Feature names that count as core offence and survive a drop to Minor.
const CORE_KEYWORDS: &[&str] = &[
    "attack",
    "strike",
    "bite",
    "claw",
    "slam",
    "relentless",
    "horde",
    "minion",
    "multiattack",
];

pub const HARDENED: &str = "Hardened";
pub const UNYIELDING: &str = "Unyielding";

fn add_note(adversary: &mut Adversary, note: String) {
    if !adversary.provenance.notes.contains(&note) {
        adversary.provenance.notes.push(note);
    }
}

/// Push `major` and `severe` up until the three values strictly ascend.
fn ascend(t: Thresholds) -> Thresholds {
    let minor = t.minor.max(1);
    let major = t.major.max(minor + 1);
    let severe = t.severe.max(major + 1);
    Thresholds::new(minor, major, severe)
}

fn band_ratio(from: Band, to: Band) -> f64 {
    let origin = from.midpoint();
    if origin == 0.0 {
        1.0
    } else {
        to.midpoint() / origin
    }
}

fn scale(value: f64, ratio: f64) -> f64 {
    (value * ratio).round()
}

struct DamageScale {
    pool_ratio: f64,
    evasion_ratio: f64,
}

impl DamageScale {
    fn apply(&self, damage: DamageExpr) -> DamageExpr {
        let mut out = damage;
        out.count = (scale(damage.count as f64, self.pool_ratio) as u32).max(1);
        out.modifier = scale(damage.modifier as f64, self.evasion_ratio) as i32;
        out
    }

    fn apply_attack(&self, attack: &mut Attack, modifier_shift: i32) {
        attack.modifier += modifier_shift;
        attack.damage = self.apply(attack.damage);
    }
}

/// Move an adversary to another tier by the ratio between the two tiers'
/// reference values.
pub fn rescale_tier(adversary: &Adversary, target: Tier, refs: &TierReference) -> Adversary {
    if adversary.tier == target {
        return adversary.clone();
    }
    let from = refs.row(adversary.tier);
    let to = refs.row(target);
    let mut out = adversary.clone();

    let evasion_ratio = to.evasion_default as f64 / from.evasion_default as f64;
    out.evasion = scale(adversary.evasion as f64, evasion_ratio) as i32;

    let t = adversary.thresholds;
    let scaled = Thresholds::new(
        scale(t.minor as f64, band_ratio(from.minor_threshold, to.minor_threshold)) as i32,
        scale(t.major as f64, band_ratio(from.major_threshold, to.major_threshold)) as i32,
        scale(t.severe as f64, band_ratio(from.severe_threshold, to.severe_threshold)) as i32,
    );
    out.thresholds = if t.is_ascending() { ascend(scaled) } else { scaled };

    let role = HpRole::for_archetype(adversary.archetype);
    if adversary.archetype == Archetype::Minion {
        out.hp = 1;
        out.stress = 0;
    } else {
        out.hp = (scale(adversary.hp as f64, band_ratio(from.hp(role), to.hp(role))) as u32).max(1);
        out.stress = scale(adversary.stress as f64, band_ratio(from.stress, to.stress)) as u32;
    }

    let damage = DamageScale {
        pool_ratio: to.dice_pool / from.dice_pool,
        evasion_ratio,
    };
    let shift = to.attack_modifier - from.attack_modifier;
    damage.apply_attack(&mut out.attack, shift);
    for attack in &mut out.additional_attacks {
        damage.apply_attack(attack, shift);
    }
    for feature in &mut out.features {
        if let Some(d) = feature.damage {
            feature.damage = Some(damage.apply(d));
        }
    }

    if out.relentless.is_some() {
        let count = relentless_count(target);
        out.relentless = Some(count);
        replace_prefixed(&mut out.features, "Relentless (", relentless_feature(count));
    }
    if let Some(h) = &adversary.horde {
        let info = HordeInfo {
            per_hp: h.per_hp,
            starting: damage.apply(h.starting),
            reduced: damage.apply(h.reduced),
        };
        replace_prefixed(&mut out.features, "Horde (", horde_feature(&info));
        out.horde = Some(info);
    }
    for exp in &mut out.narrative.experiences {
        exp.bonus = experience_bonus(target);
    }

    out.tier = target;
    add_note(
        &mut out,
        format!("Rescaled from Tier {} to Tier {}.", adversary.tier, target),
    );
    debug!(from = %adversary.tier, to = %target, "rescaled {}", adversary.name);
    out
}

fn replace_prefixed(features: &mut [Feature], prefix: &str, replacement: Feature) {
    if let Some(f) = features.iter_mut().find(|f| f.name.starts_with(prefix)) {
        *f = replacement;
    }
}

fn is_core(feature: &Feature) -> bool {
    let lower = feature.name.to_lowercase();
    CORE_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Apply the difference between two rows of the difficulty modifier table.
pub fn rescale_difficulty(
    adversary: &Adversary,
    target: Difficulty,
    refs: &TierReference,
) -> Adversary {
    if adversary.difficulty == target {
        return adversary.clone();
    }
    let from = refs.difficulty_modifier(adversary.difficulty);
    let to = refs.difficulty_modifier(target);
    let mut out = adversary.clone();

    let delta = |i: usize| to.thresholds[i] - from.thresholds[i];
    let t = adversary.thresholds;
    let shifted = Thresholds::new(
        (t.minor + delta(0)).max(1),
        (t.major + delta(1)).max(1),
        (t.severe + delta(2)).max(1),
    );
    out.thresholds = if t.is_ascending() { ascend(shifted) } else { shifted };

    if adversary.archetype != Archetype::Minion {
        out.hp = (adversary.hp as i64 + (to.hp - from.hp) as i64).max(1) as u32;
    }

    match target {
        Difficulty::Severe => {
            if !out.features.iter().any(|f| f.name == HARDENED) {
                out.features.push(Feature::passive(
                    HARDENED,
                    "When this adversary would mark 3 or more HP from a single attack, \
                     it marks one fewer.",
                ));
            }
        }
        Difficulty::Minor => {
            if let Some(idx) = out.features.iter().position(|f| !is_core(f)) {
                let dropped = out.features.remove(idx);
                add_note(&mut out, format!("Dropped feature '{}'.", dropped.name));
            }
        }
        Difficulty::Major => {}
    }

    out.difficulty = target;
    add_note(
        &mut out,
        format!(
            "Difficulty changed from {} to {}.",
            adversary.difficulty, target
        ),
    );
    out
}

/// Named one-step adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Tougher,
    Weaker,
    Deadlier,
    Softer,
    Elite,
    Minionize,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Tougher,
        Preset::Weaker,
        Preset::Deadlier,
        Preset::Softer,
        Preset::Elite,
        Preset::Minionize,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Tougher => "tougher",
            Preset::Weaker => "weaker",
            Preset::Deadlier => "deadlier",
            Preset::Softer => "softer",
            Preset::Elite => "elite",
            Preset::Minionize => "minionize",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ConvertError;

    fn from_str(s: &str) -> ConvertResult<Self> {
        let wanted = s.trim().to_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                ConvertError::domain(format!(
                    "unknown preset '{}' (expected tougher, weaker, deadlier, softer, elite \
                     or minionize)",
                    s.trim()
                ))
            })
    }
}

fn shift_thresholds(t: Thresholds, by: i32) -> Thresholds {
    let shifted = Thresholds::new(
        (t.minor + by).max(1),
        (t.major + by).max(1),
        (t.severe + by).max(1),
    );
    if t.is_ascending() { ascend(shifted) } else { shifted }
}

fn adjust_primary_dice(out: &mut Adversary, delta: i32) {
    out.attack.damage = out.attack.damage.adjust_count(delta);
    if let Some(h) = &mut out.horde {
        h.starting = out.attack.damage;
        h.reduced = out.attack.damage.adjust_count(-1);
        let refreshed = horde_feature(h);
        replace_prefixed(&mut out.features, "Horde (", refreshed);
    }
}

fn minionize(out: &mut Adversary) {
    out.hp = 1;
    out.stress = 0;
    out.thresholds = Thresholds::new(1, 1, 1);
    out.features.retain(|f| {
        !f.costs_stress() && !f.name.starts_with("Relentless") && !f.name.starts_with("Horde")
    });
    out.relentless = None;
    out.horde = None;
    out.archetype = Archetype::Minion;
    out.difficulty = Difficulty::Minor;
    if !out.has_feature_prefix("Minion (") {
        let added = minion_features(&out.name, minion_step(out.tier), &out.attack);
        for f in added {
            if out.feature(&f.name).is_none() {
                out.features.push(f);
            }
        }
    }
}

pub fn quick_adjust(adversary: &Adversary, preset: Preset) -> Adversary {
    let mut out = adversary.clone();
    let minion = adversary.archetype == Archetype::Minion;
    match preset {
        Preset::Tougher => {
            if !minion {
                out.hp = (adversary.hp as f64 * 1.25).ceil() as u32;
            }
            out.thresholds = shift_thresholds(adversary.thresholds, 1);
        }
        Preset::Weaker => {
            if !minion {
                out.hp = ((adversary.hp as f64 * 0.75).floor() as u32).max(1);
            }
            out.thresholds = shift_thresholds(adversary.thresholds, -1);
        }
        Preset::Deadlier => adjust_primary_dice(&mut out, 1),
        Preset::Softer => adjust_primary_dice(&mut out, -1),
        Preset::Elite => {
            if !minion {
                out.stress += 1;
            }
            if out.feature(UNYIELDING).is_none() {
                out.features.push(
                    Feature::reaction(
                        UNYIELDING,
                        "Mark a Stress to stay standing with 1 HP unmarked instead.",
                    )
                    .with_trigger("When this adversary would mark its last HP")
                    .with_cost(Cost::Stress(1)),
                );
            }
        }
        Preset::Minionize => minionize(&mut out),
    }
    add_note(&mut out, format!("Quick adjustment: {}.", preset));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascend_fixes_collapsed_thresholds() {
        assert_eq!(ascend(Thresholds::new(1, 1, 2)), Thresholds::new(1, 2, 3));
        assert_eq!(ascend(Thresholds::new(4, 8, 12)), Thresholds::new(4, 8, 12));
    }

    #[test]
    fn preset_names_parse() {
        assert_eq!("Minionize".parse::<Preset>().unwrap(), Preset::Minionize);
        assert!("sturdier".parse::<Preset>().is_err());
    }
}
