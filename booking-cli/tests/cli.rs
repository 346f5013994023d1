//! Integration tests for the inspection and room commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();

    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("room"));
}

#[test]
fn test_version_flag() {
    let env = TestEnv::new();

    env.command_bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("booking"));
}

#[test]
fn test_status_reports_api_version() {
    let env = TestEnv::new();

    let output = env.command().arg("status").output().unwrap();
    assert!(output.status.success());

    let status: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["api_version"], "1.1.0");
    assert!(status["authors"].is_array());
}

#[test]
fn test_status_does_not_create_database() {
    let env = TestEnv::new();

    env.command().arg("status").assert().success();
    assert!(!env.data_dir.exists());
}

#[test]
fn test_health_ready() {
    let env = TestEnv::new();

    let output = env.command().arg("health").output().unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["live"], true);
    assert_eq!(report["ready"], true);
    assert!(report.get("detail").is_none());
}

#[test]
fn test_health_unreachable_store() {
    let env = TestEnv::new();
    std::fs::create_dir_all(&env.data_dir).unwrap();

    let output = env
        .command()
        .args(["--disable-autoinit", "health"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["live"], true);
    assert_eq!(report["ready"], false);
    assert!(report["detail"].is_string());
}

#[test]
fn test_room_add_list_remove() {
    let env = TestEnv::new();
    let room = env.add_room("Conservatory");

    env.command()
        .args(["room", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&room))
        .stdout(predicate::str::contains("Conservatory"));

    env.command()
        .args(["room", "remove", &room])
        .assert()
        .success();

    // Removed rooms stay listed but take no bookings
    let output = env
        .command()
        .args(["room", "list", "--format", "json"])
        .output()
        .unwrap();
    let rooms: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(rooms[0]["deleted_at"].is_string());

    env.command()
        .args(["create", "--room", &room, "--from", "2023-01-01", "--to", "2023-01-02"])
        .assert()
        .code(1);

    env.command()
        .args(["room", "remove", &room])
        .assert()
        .code(3);
}

#[test]
fn test_room_add_with_explicit_id() {
    let env = TestEnv::new();
    let id = "3a8e8a3c-5d1f-4f0e-9b7a-2c6d4e8f1a0b";

    env.command()
        .args(["room", "add", "Loft", "--id", id])
        .assert()
        .success()
        .stdout(predicate::str::contains(id));
}

#[test]
fn test_room_add_blank_name_is_invalid_arguments() {
    let env = TestEnv::new();

    env.command().args(["room", "add", "   "]).assert().code(4);
}
