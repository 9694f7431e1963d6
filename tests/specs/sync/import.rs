//! `tock import` specs

use crate::prelude::*;

const LEGACY_DB: &str = r#"{
  "jobs": [
    {"name": "Backup", "time": "02:00", "command": "backup.sh", "daily": true, "days": []},
    {"name": "Report", "time": "09:30", "command": "report.sh", "daily": false, "days": ["MON", "FRI"]}
  ]
}"#;

#[test]
fn import_legacy_database() {
    let tock = Tock::new();
    let file = tock.file("db.json", LEGACY_DB);

    tock.tock()
        .args(&["import", file.to_str().unwrap()])
        .passes()
        .stdout_has("2 jobs: 2 imported");

    assert_eq!(tock.declared(), ["Backup", "Report"]);
    assert_eq!(
        tock.crontab(),
        "# tock:Backup\n0 2 * * * backup.sh\n# tock:Report\n30 9 * * 1,5 report.sh\n"
    );
}

#[test]
fn import_reports_invalid_jobs_and_keeps_the_rest() {
    let tock = Tock::new();
    let file = tock.file(
        "jobs.json",
        r#"{"v": 2, "jobs": [
            {"name": "good", "command": "g.sh", "time": "10:00", "schedule": {"kind": "daily"}},
            {"name": "late", "command": "l.sh", "time": "24:00", "schedule": {"kind": "daily"}}
        ]}"#,
    );

    let out = tock
        .tock()
        .args(&["import", file.to_str().unwrap()])
        .exits_with(2)
        .stdout_has("invalid")
        .stdout_has("1 imported, 1 failed");

    assert!(out.stderr().contains("1 job failed"), "{}", out.stderr());
    assert_eq!(tock.declared(), ["good"]);
    assert_eq!(tock.registered(), ["good"]);
}

#[test]
fn import_missing_file() {
    let tock = Tock::new();
    tock.tock()
        .args(&["import", "/nonexistent/db.json"])
        .exits_with(1)
        .stderr_has("failed to read");
}

#[test]
fn import_malformed_file_changes_nothing() {
    let tock = Tock::new();
    let file = tock.file("db.json", "{\"jobs\": [\"Backup\"]}");

    tock.tock()
        .args(&["import", file.to_str().unwrap()])
        .exits_with(1)
        .stderr_has("corrupt job store");

    assert!(tock.declared().is_empty());
}
