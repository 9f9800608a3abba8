//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENARIO: &str = "###Animals\ncanis;dog\nfelis;cat\n###Colors\nruber;red\n";

fn flashdeck(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("flashdeck").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("FLASHDECK_CATALOG")
        .env_remove("FLASHDECK_STORE")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("vokabeln.csv"), SCENARIO).unwrap();
    dir
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    flashdeck(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Flashcard vocabulary trainer"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    flashdeck(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flashdeck"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    flashdeck(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created flashdeck.toml"))
        .stdout(predicate::str::contains("Created vokabeln.csv"));

    assert!(dir.path().join("flashdeck.toml").exists());
    assert!(dir.path().join("vokabeln.csv").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    flashdeck(dir.path()).arg("init").assert().success();

    flashdeck(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_then_stats_uses_sample_catalog() {
    let dir = TempDir::new().unwrap();
    flashdeck(dir.path()).arg("init").assert().success();

    flashdeck(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected: 8"))
        .stdout(predicate::str::contains("Farben"));

    assert!(dir.path().join(".flashdeck/store.json").exists());
}

#[test]
fn validate_clean_catalog() {
    let dir = workspace();
    flashdeck(dir.path())
        .args(["validate", "--catalog", "vokabeln.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 entries, 2 groups"))
        .stdout(predicate::str::contains("Catalog valid."));
}

#[test]
fn validate_reports_duplicates_and_dropped_lines() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("dupes.csv"),
        "###A\ncanis;dog\nbroken line\n###B\ncanis;hound\n",
    )
    .unwrap();

    flashdeck(dir.path())
        .args(["validate", "--catalog", "dupes.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate front 'canis'"))
        .stdout(predicate::str::contains("[line 3]"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    flashdeck(dir.path())
        .args(["validate", "--catalog", "nonexistent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn study_script_persists_progress() {
    let dir = workspace();

    flashdeck(dir.path())
        .args(["study", "--catalog", "vokabeln.csv", "--store", "store.json", "--seed", "1"])
        .write_stdin("g Colors\nk\nt\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Selected: 2 | Known: 0 | Unknown: 0 | Unmarked: 2",
        ))
        .stdout(predicate::str::contains(
            "Selected: 2 | Known: 1 | Unknown: 0 | Unmarked: 1",
        ))
        .stdout(predicate::str::contains("(unknown only)"));

    let store: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("store.json")).unwrap())
            .unwrap();
    let selected = store["selectedVocabSets"].as_str().unwrap();
    assert_eq!(selected, r#"["Animals"]"#);
    let progress = store["vocabProgress"].as_str().unwrap();
    assert!(progress.contains("\"known\""));

    // A new session remembers both the deselection and the mark.
    flashdeck(dir.path())
        .args(["stats", "--catalog", "vokabeln.csv", "--store", "store.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Selected: 2 | Known: 1 | Unknown: 0 | Unmarked: 1",
        ));
}

#[test]
fn study_with_everything_filtered_shows_empty_state() {
    let dir = workspace();

    flashdeck(dir.path())
        .args(["study", "--catalog", "vokabeln.csv", "--store", "store.json"])
        .write_stdin("g Animals\ng Colors\nn\nk\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keine Vokabeln im Filter!"))
        .stdout(predicate::str::contains(
            "Selected: 0 | Known: 0 | Unknown: 0 | Unmarked: 0",
        ));
}

#[test]
fn groups_toggle_and_list() {
    let dir = workspace();

    flashdeck(dir.path())
        .args([
            "groups",
            "--catalog",
            "vokabeln.csv",
            "--store",
            "store.json",
            "--toggle",
            "Colors",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deselected Colors"))
        .stdout(predicate::str::contains("[x] Animals"))
        .stdout(predicate::str::contains("[ ] Colors"));

    flashdeck(dir.path())
        .args(["groups", "--catalog", "vokabeln.csv", "--store", "store.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Colors"));
}

#[test]
fn groups_toggle_unknown_name_fails() {
    let dir = workspace();

    flashdeck(dir.path())
        .args([
            "groups",
            "--catalog",
            "vokabeln.csv",
            "--store",
            "store.json",
            "--toggle",
            "Plants",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown group: Plants"));
}

#[test]
fn stats_json_output() {
    let dir = workspace();

    let output = flashdeck(dir.path())
        .args([
            "stats",
            "--catalog",
            "vokabeln.csv",
            "--store",
            "store.json",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["unmarked"], 3);
}

#[test]
fn stats_rejects_unknown_format() {
    let dir = workspace();

    flashdeck(dir.path())
        .args([
            "stats",
            "--catalog",
            "vokabeln.csv",
            "--store",
            "store.json",
            "--format",
            "yaml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'yaml'"));

    assert!(!dir.path().join("store.json").exists());
}

#[test]
fn missing_catalog_is_fatal() {
    let dir = TempDir::new().unwrap();

    flashdeck(dir.path())
        .args(["study", "--catalog", "missing.csv", "--store", "store.json"])
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load catalog"));

    assert!(!dir.path().join("store.json").exists());
}

#[test]
fn catalog_from_env_override() {
    let dir = workspace();

    flashdeck(dir.path())
        .env("FLASHDECK_CATALOG", "vokabeln.csv")
        .env("FLASHDECK_STORE", "env-store.json")
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected: 3"));

    assert!(dir.path().join("env-store.json").exists());
}
