//! CLI command integration tests.
//! Each test points XDG/HOME at a temp directory so no user catalog leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn moods_cmd(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("enchanted-moods").unwrap();
    cmd.env("HOME", home.path());
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_catalog(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn list_shows_builtin_moods() {
    let home = TempDir::new().unwrap();
    moods_cmd(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unicorn"))
        .stdout(predicate::str::contains("Wise Owl"))
        .stdout(predicate::str::contains("Default mood: happy"));
}

#[test]
fn list_json_is_parseable() {
    let home = TempDir::new().unwrap();
    let output = moods_cmd(&home)
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 5);
}

#[test]
fn draw_full_cycle_has_no_adjacent_repeats() {
    let home = TempDir::new().unwrap();
    let output = moods_cmd(&home)
        .args(["draw", "calm", "-n", "12", "--seed", "3", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let quotes: Vec<&str> = parsed["quotes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q.as_str().unwrap())
        .collect();
    assert_eq!(quotes.len(), 12);
    for pair in quotes.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn draw_with_same_seed_is_reproducible() {
    let home = TempDir::new().unwrap();
    let run = || {
        moods_cmd(&home)
            .args(["draw", "sad", "--seed", "99"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn draw_unknown_mood_fails() {
    let home = TempDir::new().unwrap();
    moods_cmd(&home)
        .args(["draw", "bored"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown mood 'bored'"))
        .stderr(predicate::str::contains("happy, sad, anxious, excited, calm"));
}

#[test]
fn draw_rejects_huge_count() {
    let home = TempDir::new().unwrap();
    moods_cmd(&home)
        .args(["draw", "calm", "-n", "18446744073709551615"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn draw_rejects_zero_count() {
    let home = TempDir::new().unwrap();
    moods_cmd(&home)
        .args(["draw", "calm", "-n", "0"])
        .assert()
        .failure();
}

#[test]
fn draw_accepts_count_at_limit() {
    let home = TempDir::new().unwrap();
    let output = moods_cmd(&home)
        .args(["draw", "happy", "-n", "10000", "--seed", "1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["quotes"].as_array().unwrap().len(), 10_000);
}

#[test]
fn custom_catalog_is_used() {
    let home = TempDir::new().unwrap();
    let path = write_catalog(
        &home,
        r#"{"sleepy": {"icon": "🐨", "name": "Koala", "variants": ["zzz", "yawn"]}}"#,
    );
    moods_cmd(&home)
        .arg("--catalog")
        .arg(&path)
        .args(["draw", "sleepy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zzz"))
        .stdout(predicate::str::contains("yawn"));
}

#[test]
fn empty_pool_draws_nothing() {
    let home = TempDir::new().unwrap();
    let path = write_catalog(&home, r#"{"quiet": {"icon": "🐭", "name": "Mouse"}}"#);
    moods_cmd(&home)
        .arg("--catalog")
        .arg(&path)
        .args(["draw", "quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no quotes)"));
}

#[test]
fn malformed_catalog_fails() {
    let home = TempDir::new().unwrap();
    let path = write_catalog(&home, "{ not json");
    moods_cmd(&home)
        .arg("--catalog")
        .arg(&path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed catalog JSON"));
}

#[test]
fn chime_writes_wav() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("chime.wav");
    moods_cmd(&home)
        .args(["chime", "--sample-rate", "8000", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("chime.wav"));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(bytes.len(), 44 + 2 * 12_000);
}

#[test]
fn tui_with_unknown_mood_fails_before_touching_terminal() {
    let home = TempDir::new().unwrap();
    moods_cmd(&home)
        .args(["tui", "--mood", "bored"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown mood"));
}

#[test]
fn chime_rejects_out_of_range_sample_rate() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("chime.wav");
    for rate in ["0", "4000000000"] {
        moods_cmd(&home)
            .args(["chime", "--sample-rate", rate, "--out"])
            .arg(&out)
            .assert()
            .failure()
            .stderr(predicate::str::contains("--sample-rate"))
            .stderr(predicate::str::contains("panicked").not());
    }
    assert!(!out.exists());
}
