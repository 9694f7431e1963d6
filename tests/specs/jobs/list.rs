//! `tock list` specs

use crate::prelude::*;

#[test]
fn list_empty() {
    let tock = Tock::new();
    tock.tock()
        .args(&["list"])
        .passes()
        .stdout_eq("No jobs declared\n");
}

#[test]
fn list_shows_registration_state() {
    let tock = Tock::new();
    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh"])
        .passes();
    tock.tock()
        .args(&[
            "add",
            "Report",
            "--at",
            "09:30",
            "--on",
            "mon,fri",
            "-c",
            "report.sh",
        ])
        .passes();
    // Removed behind tock's back
    tock.set_crontab("# tock:Backup\n0 2 * * * backup.sh\n");

    tock.tock().args(&["list"]).passes().stdout_eq(
        "\
NAME    TIME   SCHEDULE  REGISTERED  COMMAND
Backup  02:00  daily     yes         backup.sh
Report  09:30  MON,FRI   no          report.sh
",
    );
}

#[test]
fn list_json() {
    let tock = Tock::new();
    tock.tock()
        .args(&[
            "add",
            "Report",
            "--at",
            "09:30",
            "--on",
            "mon",
            "-c",
            "report.sh",
        ])
        .passes();

    let json = tock.tock().args(&["list", "-o", "json"]).passes().json();

    assert_eq!(json[0]["name"], "Report");
    assert_eq!(json[0]["time"], "09:30");
    assert_eq!(json[0]["schedule"]["kind"], "weekly");
    assert_eq!(json[0]["schedule"]["days"][0], "MON");
    assert_eq!(json[0]["registered"], true);
}

#[test]
fn list_without_scheduler_shows_unknown() {
    let tock = Tock::new();
    tock.tock()
        .args(&["add", "Backup", "--at", "02:00", "-c", "backup.sh"])
        .passes();

    tock.tock()
        .env("TOCK_CRONTAB_BIN", "/nonexistent/crontab")
        .args(&["list"])
        .passes()
        .stdout_has("unknown")
        .stderr_has("could not query the OS scheduler");
}
