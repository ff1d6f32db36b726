use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn dhconv() -> Command {
    Command::cargo_bin("dhconv").unwrap()
}

fn monster_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../engine/content/monsters")
        .join(format!("{}.json", name))
}

/// Convert a builtin to JSON and park it in a temp file for the scaling commands.
fn adversary_file(id: &str, tag: &str) -> PathBuf {
    let out = dhconv()
        .args(["builtin", id, "--format", "json", "--seed", "1"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let path = std::env::temp_dir().join(format!("dhconv-{}-{}-{}.json", id, tag, std::process::id()));
    std::fs::write(&path, out.stdout).unwrap();
    path
}

#[test]
fn builtin_compact_line() {
    dhconv()
        .args(["builtin", "ogre", "--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Ogre (T1 Standard) Diff Minor | Ev 9 | Thr 3/6/9 | HP 5 | Stress 1",
        ));
}

#[test]
fn builtin_without_name_lists_ids() {
    dhconv()
        .arg("builtin")
        .assert()
        .success()
        .stdout(predicate::str::contains("adult_red_dragon").and(predicate::str::contains("goblin")));
}

#[test]
fn convert_file_to_markdown() {
    dhconv()
        .arg("convert")
        .arg(monster_file("goblin"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# GOBLIN"))
        .stdout(predicate::str::contains("Minion (4)"));
}

#[test]
fn convert_without_notes() {
    dhconv()
        .arg("convert")
        .arg(monster_file("ogre"))
        .arg("--no-notes")
        .assert()
        .success()
        .stdout(predicate::str::contains("DESIGN NOTES").not());
}

#[test]
fn tier_lookup() {
    dhconv()
        .args(["tier", "1/4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CR 1/4 => Tier 1 (50 XP)"));
    dhconv().args(["tier", "-2"]).assert().failure();
}

#[test]
fn rescale_and_adjust_files() {
    let ogre = adversary_file("ogre", "scale");
    dhconv()
        .arg("rescale-tier")
        .arg(&ogre)
        .args(["2", "--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ogre (T2 Standard)").and(predicate::str::contains("HP 7")));
    dhconv()
        .arg("rescale-difficulty")
        .arg(&ogre)
        .args(["severe", "--format", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hardened"));
    dhconv()
        .arg("adjust")
        .arg(&ogre)
        .arg("sturdier")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid preset"));
    let _ = std::fs::remove_file(ogre);
}

#[test]
fn check_reports_clean_builtin() {
    let dragon = adversary_file("adult_red_dragon", "check");
    dhconv()
        .arg("check")
        .arg(&dragon)
        .assert()
        .success()
        .stdout(predicate::str::contains("error:").not());
    let _ = std::fs::remove_file(dragon);
}
