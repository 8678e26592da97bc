use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("cstats").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cstats"));
}

#[test]
fn resolve_name_and_code() {
    Command::cargo_bin("cstats")
        .unwrap()
        .args(["resolve", "France"])
        .assert()
        .success()
        .stdout(predicate::str::diff("FRA\n"));

    Command::cargo_bin("cstats")
        .unwrap()
        .args(["resolve", "deu"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Germany\n"));
}

#[test]
fn resolve_unknown_fails_cleanly() {
    Command::cargo_bin("cstats")
        .unwrap()
        .args(["resolve", "Atlantis"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("country 'Atlantis' not found"));
}

#[test]
fn list_prints_every_country() {
    let out = Command::cargo_bin("cstats")
        .unwrap()
        .arg("list")
        .output()
        .unwrap();
    assert!(out.status.success());
    let txt = String::from_utf8(out.stdout).unwrap();
    assert_eq!(txt.lines().count(), 249);
    assert!(txt.contains("FRA\tFrance"));
}

#[test]
fn show_unknown_country_reports_and_exits_zero() {
    // no network needed: the name never resolves
    Command::cargo_bin("cstats")
        .unwrap()
        .args(["show", "--country", "Atlantis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Country 'Atlantis' not found."));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn show_online_france() {
    Command::cargo_bin("cstats")
        .unwrap()
        .args(["show", "--country", "France", "--from", "2015", "--to", "2020"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Capital: Paris"));
}
