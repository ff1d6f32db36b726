use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[test]
fn converts_the_sample_directory() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../engine/content/monsters");
    Command::cargo_bin("batch-convert")
        .unwrap()
        .arg(dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("batch-convert results"))
        .stdout(predicate::str::contains("Adult Red Dragon"))
        .stdout(predicate::str::contains("converted:          10"))
        .stdout(predicate::str::contains("failed:             0"));
}

#[test]
fn rejects_unknown_format() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../engine/content/monsters");
    Command::cargo_bin("batch-convert")
        .unwrap()
        .arg(dir)
        .args(["--format", "pdf"])
        .assert()
        .failure();
}
