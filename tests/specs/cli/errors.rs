//! Error handling specs: exit codes and messages for broken input

use crate::prelude::*;

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cli().args(&["frobnicate"]).exits_with(2);
}

#[test]
fn corrupt_store_is_reported_and_left_alone() {
    let tock = Tock::new();
    std::fs::create_dir_all(tock.state_path()).unwrap();
    std::fs::write(tock.store_path(), "{not json").unwrap();

    tock.tock()
        .args(&["list"])
        .exits_with(1)
        .stderr_has("corrupt job store");

    assert_eq!(
        std::fs::read_to_string(tock.store_path()).unwrap(),
        "{not json"
    );
}

#[test]
fn corrupt_store_blocks_mutations() {
    let tock = Tock::new();
    std::fs::create_dir_all(tock.state_path()).unwrap();
    std::fs::write(tock.store_path(), "[]").unwrap();

    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh"])
        .exits_with(1)
        .stderr_has("corrupt job store");
    assert!(tock.registered().is_empty());
}

#[test]
fn invalid_config_is_reported() {
    let tock = Tock::new();
    std::fs::write(
        tock.state_path().join("config.toml"),
        "[scheduler]\nretries = 3\n",
    )
    .unwrap();

    tock.tock()
        .args(&["list"])
        .exits_with(1)
        .stderr_has("invalid config");
}

#[test]
fn unknown_backend_is_reported() {
    let tock = Tock::new();
    tock.tock()
        .env("TOCK_BACKEND", "launchd")
        .args(&["list"])
        .exits_with(1)
        .stderr_has("invalid TOCK_BACKEND");
}

#[test]
fn disabled_backend_still_manages_the_store() {
    let tock = Tock::new();
    tock.tock()
        .env("TOCK_BACKEND", "none")
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh"])
        .passes();

    assert_eq!(tock.declared(), ["Backup"]);
    assert!(tock.registered().is_empty());
}
