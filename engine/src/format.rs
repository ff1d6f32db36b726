//! Text renderings of a finished adversary.

use std::fmt::Write as _;

use crate::adversary::{Adversary, Attack, Feature};
use crate::config::OutputFormat;

fn attack_line(attack: &Attack) -> String {
    format!(
        "{} {:+} | {} | {}",
        attack.name, attack.modifier, attack.range, attack.damage
    )
}

fn feature_heading(feature: &Feature) -> String {
    match feature.cost {
        Some(cost) => format!("{} - {} ({})", feature.name, feature.kind, cost),
        None => format!("{} - {}", feature.name, feature.kind),
    }
}

/// Stat block in Markdown.
pub fn markdown(adversary: &Adversary) -> String {
    let a = adversary;
    let mut out = String::new();

    let _ = writeln!(out, "# {}", a.name.to_uppercase());
    let role = a
        .role
        .map(|r| format!(" ({})", r.as_str()))
        .unwrap_or_default();
    let _ = writeln!(out, "***Tier {} {}{}***", a.tier, a.archetype, role);
    if !a.narrative.description.is_empty() {
        let _ = writeln!(out, "*{}*", a.narrative.description);
    }
    if !a.narrative.motives_tactics.is_empty() {
        let _ = writeln!(
            out,
            "**Motives & Tactics:** {}",
            a.narrative.motives_tactics.join(", ")
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "> **Difficulty:** {} | **Evasion:** {} | **Thresholds:** {} | **HP:** {} | **Stress:** {}",
        a.difficulty, a.evasion, a.thresholds, a.hp, a.stress
    );
    let _ = writeln!(
        out,
        "> **ATK:** {:+} | **{}:** {} | {}",
        a.attack.modifier, a.attack.name, a.attack.range, a.attack.damage
    );
    for effect in &a.attack.effects {
        let _ = writeln!(out, "> {}", effect);
    }
    for extra in &a.additional_attacks {
        let _ = writeln!(out, "> **Also:** {}", attack_line(extra));
        for effect in &extra.effects {
            let _ = writeln!(out, "> {}", effect);
        }
    }
    if !a.narrative.experiences.is_empty() {
        let exps: Vec<String> = a
            .narrative
            .experiences
            .iter()
            .map(|e| format!("{} {:+}", e.name, e.bonus))
            .collect();
        let _ = writeln!(out, "> **Experience:** {}", exps.join(", "));
    }
    let m = a.movement;
    let modes: Vec<&str> = [
        (m.flying, "flying"),
        (m.swimming, "swimming"),
        (m.climbing, "climbing"),
        (m.burrowing, "burrowing"),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| *name)
    .collect();
    if !modes.is_empty() {
        let _ = writeln!(out, "> **Movement:** {}", modes.join(", "));
    }

    if !a.features.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "## FEATURES");
        for feature in &a.features {
            let _ = writeln!(out);
            let _ = writeln!(out, "***{}:***", feature_heading(feature));
            if let Some(trigger) = &feature.trigger {
                let _ = writeln!(out, "*Trigger:* {}.", trigger);
            }
            let _ = writeln!(out, "{}", feature.description);
            if !feature.conditions.is_empty() {
                let _ = writeln!(out, "*Conditions:* {}", feature.conditions.join(", "));
            }
        }
    }

    if let Some(notes) = &a.narrative.design_notes {
        let _ = writeln!(out);
        let _ = writeln!(out, "## DESIGN NOTES");
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", notes);
        for note in &a.provenance.notes {
            let _ = writeln!(out, "- {}", note);
        }
    }
    out
}

/// One line: identity, core stats and the primary attack.
pub fn compact(adversary: &Adversary) -> String {
    let a = adversary;
    let mut line = format!(
        "{} (T{} {}) Diff {} | Ev {} | Thr {} | HP {} | Stress {} | {}",
        a.name,
        a.tier,
        a.archetype,
        a.difficulty,
        a.evasion,
        a.thresholds,
        a.hp,
        a.stress,
        attack_line(&a.attack)
    );
    if !a.features.is_empty() {
        let names: Vec<&str> = a.features.iter().map(|f| f.name.as_str()).collect();
        let _ = write!(line, " | {}", names.join(", "));
    }
    line
}

/// Render in `format`. JSON output falls back to the compact line if
/// serialization fails.
pub fn render(adversary: &Adversary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Markdown => markdown(adversary),
        OutputFormat::Compact => compact(adversary),
        OutputFormat::Json => {
            serde_json::to_string_pretty(adversary).unwrap_or_else(|_| compact(adversary))
        }
    }
}
