//! Integration tests for relapse, reset and start date changes

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

mod common;
use common::sobriety_cmd;

fn read_record(dir: &Path) -> anyhow::Result<serde_json::Value> {
    let contents = fs::read_to_string(dir.join("sobriety_data.json"))?;
    Ok(serde_json::from_str(&contents)?)
}

#[test]
fn test_relapse_requires_confirmation() {
    let temp = TempDir::new().unwrap();

    sobriety_cmd(temp.path())
        .arg("relapse")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--yes"));

    assert!(!temp.path().join("sobriety_data.json").exists());
}

#[test]
fn test_relapse_is_persisted() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    sobriety_cmd(temp.path())
        .args(["relapse", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Relapse logged"));

    let record = read_record(temp.path())?;
    assert!(record["startDate"].is_string());
    assert_eq!(record["relapses"].as_array().map(Vec::len), Some(1));

    sobriety_cmd(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Streak: 0 days"))
        .stdout(predicate::str::contains("Relapses:       1"));
    Ok(())
}

#[test]
fn test_reset_clears_relapses() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    sobriety_cmd(temp.path()).args(["relapse", "-y"]).assert().success();
    sobriety_cmd(temp.path()).args(["relapse", "-y"]).assert().success();
    sobriety_cmd(temp.path()).arg("reset").assert().code(4);
    assert_eq!(read_record(temp.path())?["relapses"].as_array().map(Vec::len), Some(2));

    sobriety_cmd(temp.path())
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracker reset"));

    assert_eq!(read_record(temp.path())?["relapses"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[test]
fn test_start_date_moves_streak() {
    let temp = TempDir::new().unwrap();

    sobriety_cmd(temp.path())
        .args(["start-date", "10 days ago"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start date set to"));

    sobriety_cmd(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Streak: 10 days"))
        .stdout(predicate::str::contains("Longest Streak: 10 days"))
        .stdout(predicate::str::contains("Total Days:     10 days"));
}

#[test]
fn test_start_date_keeps_relapses() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    sobriety_cmd(temp.path()).args(["relapse", "--yes"]).assert().success();
    sobriety_cmd(temp.path())
        .args(["start-date", "2020-01-01"])
        .assert()
        .success();

    let record = read_record(temp.path())?;
    assert_eq!(record["relapses"].as_array().map(Vec::len), Some(1));

    sobriety_cmd(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Start Date:     Jan 1, 2020"))
        .stdout(predicate::str::contains("Current Streak: 0 days"));
    Ok(())
}

#[test]
fn test_start_date_rejects_future() {
    let temp = TempDir::new().unwrap();

    sobriety_cmd(temp.path())
        .args(["start-date", "2999-01-01"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("after today"));

    sobriety_cmd(temp.path())
        .args(["start-date", "whenever"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid date: 'whenever'"));
}

#[test]
fn test_corrupt_record_is_kept_aside() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("sobriety_data.json"), "{ broken").unwrap();

    sobriety_cmd(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Relapses:       0"))
        .stderr(predicate::str::contains("could not be read"));

    let kept: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("sobriety_data.json.corrupt-"))
        .collect();
    assert_eq!(kept.len(), 1);
}
