//! Integration tests for the Squirrel CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master password is supplied through `SQUIRREL_PASSWORD` and entry
//! passwords through `--password`, so nothing waits on a terminal prompt.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "correct horse battery";

/// Helper: get a Command pointing at the squirrel binary.
fn squirrel() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("squirrel").expect("binary should exist")
}

/// Helper: a command running inside `tmp` with the master password set.
fn squirrel_in(tmp: &TempDir) -> Command {
    let mut cmd = squirrel();
    cmd.current_dir(tmp.path())
        .env("SQUIRREL_PASSWORD", PASSWORD)
        .env_remove("SQUIRREL_LOG");
    cmd
}

/// Helper: initialize a store in `tmp` and add two entries.
fn seeded_store() -> TempDir {
    let tmp = TempDir::new().unwrap();
    squirrel_in(&tmp).arg("init").assert().success();
    squirrel_in(&tmp)
        .args(["add", "GitHub", "-u", "octocat", "-p", "gh-secret"])
        .assert()
        .success();
    squirrel_in(&tmp)
        .args(["add", "Bank", "-u", "alice", "-p", "bank-secret", "-a", "bank.example"])
        .assert()
        .success();
    tmp
}

#[test]
fn help_flag_shows_usage() {
    squirrel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password store"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn version_flag_shows_version() {
    squirrel()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("squirrel"));
}

#[test]
fn no_args_shows_help() {
    squirrel()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn status_without_store_hints_init() {
    let tmp = TempDir::new().unwrap();
    squirrel_in(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("squirrel init"));
}

#[test]
fn list_without_store_fails() {
    let tmp = TempDir::new().unwrap();
    squirrel_in(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn init_creates_store_files() {
    let tmp = TempDir::new().unwrap();
    squirrel_in(&tmp).arg("init").assert().success();

    assert!(tmp.path().join(".squirrel").is_dir());
    assert!(tmp.path().join(".squirrel").join("enc.bin").is_file());
}

#[test]
fn init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    squirrel_in(&tmp).arg("init").assert().success();
    squirrel_in(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn init_rejects_short_password() {
    let tmp = TempDir::new().unwrap();
    squirrel_in(&tmp)
        .env("SQUIRREL_PASSWORD", "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn dir_flag_overrides_store_location() {
    let tmp = TempDir::new().unwrap();
    squirrel_in(&tmp)
        .args(["--dir", "custom-store", "init"])
        .assert()
        .success();

    assert!(tmp.path().join("custom-store").join("enc.bin").is_file());
    assert!(!tmp.path().join(".squirrel").exists());
}

#[test]
fn add_then_list_and_show() {
    let tmp = seeded_store();

    squirrel_in(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("octocat"))
        .stdout(predicate::str::contains("Bank"));

    squirrel_in(&tmp)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("gh-secret").not());

    squirrel_in(&tmp)
        .args(["show", "2", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bank-secret"))
        .stdout(predicate::str::contains("bank.example"));
}

#[test]
fn list_rejects_unknown_order() {
    let tmp = seeded_store();
    squirrel_in(&tmp)
        .args(["list", "notes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown order"));
}

#[test]
fn secrets_are_not_stored_in_clear() {
    let tmp = seeded_store();
    let data = std::fs::read(tmp.path().join(".squirrel").join("data.bin")).unwrap();
    let text = String::from_utf8_lossy(&data);

    assert!(text.contains("GitHub"));
    assert!(!text.contains("gh-secret"));
    assert!(!text.contains("octocat"));
}

#[test]
fn wrong_password_fails() {
    let tmp = seeded_store();
    squirrel_in(&tmp)
        .env("SQUIRREL_PASSWORD", "not the password")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong password"));
}

#[test]
fn edit_changes_only_given_fields() {
    let tmp = seeded_store();
    squirrel_in(&tmp)
        .args(["edit", "1", "--title", "GitLab"])
        .assert()
        .success();

    squirrel_in(&tmp)
        .args(["show", "1", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitLab"))
        .stdout(predicate::str::contains("octocat"))
        .stdout(predicate::str::contains("gh-secret"));
}

#[test]
fn delete_force_removes_entry() {
    let tmp = seeded_store();
    squirrel_in(&tmp)
        .args(["delete", "1", "--force"])
        .assert()
        .success();

    squirrel_in(&tmp)
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry 1 not found"));

    squirrel_in(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("There are 1 entries, last ID 2"));
}

#[test]
fn delete_missing_entry_fails() {
    let tmp = seeded_store();
    squirrel_in(&tmp)
        .args(["delete", "42", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry 42 not found"));
}

#[test]
fn add_fails_when_ids_are_exhausted() {
    let tmp = TempDir::new().unwrap();
    squirrel_in(&tmp).arg("init").assert().success();

    let data = tmp.path().join(".squirrel").join("data.bin");
    let last = squirrel::vault::Entry {
        id: i64::MAX,
        title: "last".into(),
        ..Default::default()
    };
    std::fs::write(&data, squirrel::vault::record::encode(&last)).unwrap();

    squirrel_in(&tmp)
        .args(["add", "one-more", "-p", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no IDs left"));

    assert_eq!(
        std::fs::read(&data).unwrap(),
        squirrel::vault::record::encode(&last)
    );
}
