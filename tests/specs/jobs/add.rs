//! `tock add` specs

use crate::prelude::*;

#[test]
fn add_daily_job_declares_and_registers() {
    let tock = Tock::new();

    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh --full"])
        .passes()
        .stdout_eq("Added job Backup\n");

    assert_eq!(tock.declared(), ["Backup"]);
    assert_eq!(
        tock.crontab(),
        "# tock:Backup\n0 2 * * * backup.sh --full\n"
    );
}

#[test]
fn add_weekly_job_uses_weekday_numbers() {
    let tock = Tock::new();

    tock.tock()
        .args(&[
            "add",
            "Report",
            "--at",
            "09:30",
            "--on",
            "fri,mon",
            "-c",
            "report.sh",
        ])
        .passes();

    assert_eq!(tock.crontab(), "# tock:Report\n30 9 * * 1,5 report.sh\n");
}

#[test]
fn add_keeps_unquoted_program_path_with_spaces() {
    let tock = Tock::new();

    tock.tock()
        .args(&[
            "add",
            "Backup",
            "--at",
            "02:00",
            "-c",
            r"C:\Program Files\App\app.exe --flag",
        ])
        .passes();

    assert_eq!(
        tock.crontab(),
        "# tock:Backup\n0 2 * * * 'C:\\Program Files\\App\\app.exe' --flag\n"
    );
}

#[test]
fn add_same_name_replaces() {
    let tock = Tock::new();
    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "a.sh"])
        .passes();

    tock.tock()
        .args(&["add", "Backup", "--at", "03:00", "-c", "b.sh"])
        .passes()
        .stdout_eq("Replaced job Backup\n");

    assert_eq!(tock.declared(), ["Backup"]);
    assert_eq!(tock.crontab(), "# tock:Backup\n0 3 * * * b.sh\n");
}

#[test]
fn add_invalid_time_touches_nothing() {
    let tock = Tock::new();

    tock.tock()
        .args(&["add", "Backup", "--at", "25:00", "-c", "a.sh"])
        .exits_with(1)
        .stderr_has("invalid time");

    assert!(tock.declared().is_empty());
    assert!(tock.registered().is_empty());
}

#[test]
fn add_reserved_name_is_rejected() {
    let tock = Tock::new();

    tock.tock()
        .args(&["add", "a/b", "--at", "02:00", "-c", "a.sh"])
        .exits_with(1)
        .stderr_has("invalid job name");
}

#[test]
fn add_refused_by_scheduler_keeps_the_declaration() {
    let tock = Tock::new();
    tock.deny_writes(true);

    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "a.sh"])
        .exits_with(1)
        .stderr_has("was saved but is not registered")
        .stderr_has("not allowed");

    assert_eq!(tock.declared(), ["Backup"]);
    assert!(tock.registered().is_empty());

    // A later sync repairs it
    tock.deny_writes(false);
    tock.tock().args(&["sync"]).passes();
    assert_eq!(tock.registered(), ["Backup"]);
}

#[test]
fn add_json_output() {
    let tock = Tock::new();
    let json = tock
        .tock()
        .args(&["-o", "json", "add", "Backup", "--at", "02:00", "-c", "a.sh"])
        .passes()
        .json();

    assert_eq!(json["name"], "Backup");
    assert_eq!(json["applied"], "created");
}
