mod common;

use common::convert_builtin;
use dh_engine::format::{compact, markdown, render};
use dh_engine::{DamageExpr, DamageKind, DieSize, OutputFormat};
use insta::assert_snapshot;

#[test]
fn ogre_compact_line() {
    let ogre = convert_builtin("ogre");
    assert_snapshot!(compact(&ogre), @"Ogre (T1 Standard) Diff Minor | Ev 9 | Thr 3/6/9 | HP 5 | Stress 1 | Greatclub +4 | Very Close | 1d12 phy");
}

#[test]
fn damage_notation() {
    let physical = DamageExpr::new(2, DieSize::D8, 4, DamageKind::Physical);
    assert_snapshot!(physical.to_string(), @"2d8+4 phy");
    assert_snapshot!(physical.with_direct(true).to_string(), @"2d8+4 direct phy");
    let magic = DamageExpr::new(1, DieSize::D6, -1, DamageKind::Magic);
    assert_snapshot!(magic.to_string(), @"1d6-1 mag");
}

#[test]
fn markdown_stat_block() {
    let dragon = convert_builtin("adult_red_dragon");
    let md = markdown(&dragon);
    assert!(md.starts_with("# ADULT RED DRAGON\n"));
    assert!(md.contains("***Tier 4 Solo***"));
    assert!(md.contains(
        "> **Difficulty:** Severe | **Evasion:** 19 | **Thresholds:** 8/16/24 | **HP:** 32 | **Stress:** 11"
    ));
    assert!(md.contains("> **ATK:** +11 | **Bite:** Close | 1d12+4 phy"));
    assert!(md.contains("## FEATURES"));
    assert!(md.contains("***Wing Attack - Action (Mark 2 Stress):***"));
    assert!(md.contains("*Trigger:* When this adversary fails a reaction roll."));
    assert!(md.contains("## DESIGN NOTES"));
    assert!(md.contains("- Classified as Solo by the 'solo' rule"));
}

#[test]
fn json_render_round_trips_through_serde() {
    let ogre = convert_builtin("ogre");
    let json = render(&ogre, OutputFormat::Json);
    let back: dh_engine::Adversary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ogre);
}
