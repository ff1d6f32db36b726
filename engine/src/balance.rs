//! Post-hoc balance check of a finished adversary against its tier row.

use std::fmt;

use serde::Serialize;

use crate::adversary::{Adversary, Archetype};
use crate::tables::{Band, HpRole, TierReference};

/// Largest distance from the tier's default attack modifier that passes
/// without comment.
pub const ATTACK_MODIFIER_TOLERANCE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    /// A structural rule of the adversary record is broken.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}: {}", tag, self.field, self.message)
    }
}

struct Report(Vec<Finding>);

impl Report {
    fn warn(&mut self, field: &'static str, message: String) {
        self.0.push(Finding {
            severity: Severity::Warning,
            field,
            message,
        });
    }

    fn error(&mut self, field: &'static str, message: String) {
        self.0.push(Finding {
            severity: Severity::Error,
            field,
            message,
        });
    }

    fn band(&mut self, field: &'static str, value: i64, band: Band) {
        if !band.contains(value as i32) {
            self.warn(
                field,
                format!(
                    "{} is outside the tier range {}-{}",
                    value, band.low, band.high
                ),
            );
        }
    }
}

pub fn check(adversary: &Adversary, refs: &TierReference) -> Vec<Finding> {
    let row = refs.row(adversary.tier);
    let mut report = Report(Vec::new());
    let minion = adversary.archetype == Archetype::Minion;

    report.band("evasion", adversary.evasion as i64, row.evasion);

    if minion {
        if adversary.hp != 1 {
            report.error("hp", format!("a Minion must have 1 HP, has {}", adversary.hp));
        }
        if adversary.stress != 0 {
            report.error(
                "stress",
                format!("a Minion must have 0 Stress, has {}", adversary.stress),
            );
        }
    } else {
        let role = HpRole::for_archetype(adversary.archetype);
        report.band("hp", adversary.hp as i64, row.hp(role));
        report.band("stress", adversary.stress as i64, row.stress);
        if !adversary.thresholds.is_ascending() {
            report.error(
                "thresholds",
                format!("{} is not strictly ascending", adversary.thresholds),
            );
        }
    }

    for attack in adversary.attacks() {
        let gap = (attack.modifier - row.attack_modifier).abs();
        if gap > ATTACK_MODIFIER_TOLERANCE {
            report.warn(
                "attack",
                format!(
                    "{} has modifier {:+}, tier default is {:+}",
                    attack.name, attack.modifier, row.attack_modifier
                ),
            );
        }
    }

    if adversary.archetype == Archetype::Solo
        && (adversary.relentless.is_none() || !adversary.has_feature_prefix("Relentless"))
    {
        report.error("relentless", "a Solo needs a Relentless feature".to_string());
    }
    if adversary.archetype == Archetype::Horde && adversary.horde.is_none() {
        report.error("horde", "a Horde needs starting and reduced damage".to_string());
    }

    let stress_features = adversary.features.iter().filter(|f| f.costs_stress()).count();
    if stress_features > 0 && adversary.stress == 0 {
        report.warn(
            "features",
            format!("{} features cost Stress but the adversary has none", stress_features),
        );
    }

    report.0
}

/// Whether any finding is an error.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}
