//! `tock delete` specs

use crate::prelude::*;

#[test]
fn delete_deregisters_and_forgets() {
    let tock = Tock::new();
    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh"])
        .passes();

    tock.tock()
        .args(&["delete", "Backup"])
        .passes()
        .stdout_eq("Deleted job Backup\n");

    assert!(tock.declared().is_empty());
    assert!(tock.registered().is_empty());
}

#[test]
fn delete_job_already_removed_from_scheduler() {
    let tock = Tock::new();
    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh"])
        .passes();
    tock.set_crontab("");

    tock.tock().args(&["delete", "Backup"]).passes();
    assert!(tock.declared().is_empty());
}

#[test]
fn delete_refused_by_scheduler_keeps_the_job() {
    let tock = Tock::new();
    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh"])
        .passes();
    tock.deny_writes(true);

    tock.tock()
        .args(&["delete", "Backup"])
        .exits_with(1)
        .stderr_has("not allowed");

    assert_eq!(tock.declared(), ["Backup"]);
    assert_eq!(tock.registered(), ["Backup"]);
}

#[test]
fn delete_unknown_job() {
    let tock = Tock::new();
    tock.tock()
        .args(&["delete", "Ghost"])
        .exits_with(1)
        .stderr_has("no job named \"Ghost\"");
}

#[test]
fn delete_leaves_foreign_crontab_lines() {
    let tock = Tock::new();
    tock.set_crontab("MAILTO=me@example.com\n15 * * * * mirror.sh\n");
    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh"])
        .passes();

    tock.tock().args(&["delete", "Backup"]).passes();

    assert_eq!(
        tock.crontab(),
        "MAILTO=me@example.com\n15 * * * * mirror.sh\n"
    );
}
