//! `tock edit` specs

use crate::prelude::*;

fn with_backup() -> Tock {
    let tock = Tock::new();
    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh"])
        .passes();
    tock
}

#[test]
fn edit_time_only() {
    let tock = with_backup();

    tock.tock()
        .args(&["edit", "Backup", "--at", "04:45"])
        .passes()
        .stdout_eq("Updated job Backup\n");

    assert_eq!(tock.crontab(), "# tock:Backup\n45 4 * * * backup.sh\n");
}

#[test]
fn edit_to_weekly_and_back() {
    let tock = with_backup();

    tock.tock()
        .args(&["edit", "Backup", "--on", "sat,sun"])
        .passes();
    assert_eq!(tock.crontab(), "# tock:Backup\n0 2 * * 0,6 backup.sh\n");

    tock.tock().args(&["edit", "Backup", "--daily"]).passes();
    assert_eq!(tock.crontab(), "# tock:Backup\n0 2 * * * backup.sh\n");
}

#[test]
fn edit_rename_moves_the_registration() {
    let tock = with_backup();
    tock.tock()
        .args(&["add", "Report", "--at", "09:00", "-c", "report.sh"])
        .passes();

    tock.tock()
        .args(&["edit", "Backup", "--rename", "Nightly"])
        .passes()
        .stdout_eq("Renamed job Backup to Nightly\n");

    assert_eq!(tock.declared(), ["Nightly", "Report"]);
    let mut registered = tock.registered();
    registered.sort();
    assert_eq!(registered, ["Nightly", "Report"]);
}

#[test]
fn edit_rename_onto_existing_job_is_rejected() {
    let tock = with_backup();
    tock.tock()
        .args(&["add", "Report", "--at", "09:00", "-c", "report.sh"])
        .passes();

    tock.tock()
        .args(&["edit", "Backup", "--rename", "Report"])
        .exits_with(1)
        .stderr_has("already exists");

    assert_eq!(tock.declared(), ["Backup", "Report"]);
}

#[test]
fn edit_unknown_job() {
    let tock = Tock::new();
    tock.tock()
        .args(&["edit", "Ghost", "--at", "01:00"])
        .exits_with(1)
        .stderr_has("no job named \"Ghost\"");
}

#[test]
fn edit_without_changes_is_an_error() {
    let tock = with_backup();
    tock.tock()
        .args(&["edit", "Backup"])
        .exits_with(1)
        .stderr_has("nothing to change");
}
