//! `tock sync` specs

use crate::prelude::*;

/// Declare jobs without touching the scheduler
fn declare(tock: &Tock, jobs: &[(&str, &str)]) {
    for (name, time) in jobs {
        tock.tock()
            .env("TOCK_BACKEND", "none")
            .args(&["add", name, "--at", time, "-c", &format!("{name}.sh")])
            .passes();
    }
}

#[test]
fn sync_registers_declared_jobs() {
    let tock = Tock::new();
    declare(&tock, &[("one", "01:00"), ("two", "02:00")]);
    assert!(tock.registered().is_empty());

    tock.tock()
        .args(&["sync"])
        .passes()
        .stdout_has("2 jobs: 2 registered");

    assert_eq!(tock.registered(), ["one", "two"]);
}

#[test]
fn sync_twice_is_unchanged() {
    let tock = Tock::new();
    declare(&tock, &[("one", "01:00")]);
    tock.tock().args(&["sync"]).passes();
    let table = tock.crontab();

    tock.tock()
        .args(&["sync"])
        .passes()
        .stdout_has("1 job: 1 unchanged");
    assert_eq!(tock.crontab(), table);
}

#[test]
fn sync_force_reregisters() {
    let tock = Tock::new();
    declare(&tock, &[("one", "01:00")]);
    tock.tock().args(&["sync"]).passes();

    tock.tock()
        .args(&["sync", "--force"])
        .passes()
        .stdout_has("1 job: 1 registered");
}

#[test]
fn sync_refused_job_reports_and_exits_2() {
    let tock = Tock::new();
    declare(
        &tock,
        &[("one", "01:00"), ("two", "02:00"), ("three", "03:00")],
    );
    tock.deny_job("two");

    let out = tock.tock().args(&["sync", "-o", "json"]).exits_with(2);
    let json = out.json();
    let entries = json["entries"].as_array().unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["outcome"]["status"], "ok");
    assert_eq!(entries[1]["name"], "two");
    assert_eq!(entries[1]["outcome"]["status"], "failed");
    assert_eq!(entries[1]["outcome"]["kind"], "permission_denied");
    assert_eq!(entries[2]["outcome"]["status"], "ok");
    assert!(out.stderr().contains("1 job failed"), "{}", out.stderr());

    assert_eq!(tock.registered(), ["one", "three"]);
    assert_eq!(tock.declared(), ["one", "two", "three"]);
}

#[test]
fn sync_refused_everything_is_text_reported() {
    let tock = Tock::new();
    declare(&tock, &[("one", "01:00"), ("two", "02:00")]);
    tock.deny_writes(true);

    tock.tock()
        .args(&["sync"])
        .exits_with(2)
        .stdout_has("failed (permission_denied)")
        .stdout_has("2 jobs: 2 failed")
        .stderr_has("2 jobs failed");
}

#[test]
fn sync_reports_orphans_without_removing_them() {
    let tock = Tock::new();
    declare(&tock, &[("one", "01:00")]);
    tock.set_crontab("# tock:stray\n0 5 * * * stray.sh\n");

    tock.tock()
        .args(&["sync"])
        .passes()
        .stdout_has("orphan")
        .stdout_has("tock sync --prune");

    assert_eq!(tock.registered(), ["stray", "one"]);
}

#[test]
fn sync_prune_removes_orphans_only() {
    let tock = Tock::new();
    declare(&tock, &[("one", "01:00")]);
    tock.set_crontab("MAILTO=me@example.com\n# tock:stray\n0 5 * * * stray.sh\n");

    tock.tock()
        .args(&["sync", "--prune"])
        .passes()
        .stdout_has("1 registered, 1 pruned");

    assert_eq!(tock.registered(), ["one"]);
    assert!(tock.crontab().starts_with("MAILTO=me@example.com\n"));
}

#[test]
fn sync_picks_up_hand_edited_store() {
    let tock = Tock::new();
    std::fs::create_dir_all(tock.state_path()).unwrap();
    std::fs::write(
        tock.store_path(),
        r#"{"v": 2, "jobs": [{"name": "edited", "command": "e.sh", "time": "07:15", "schedule": {"kind": "daily"}}]}"#,
    )
    .unwrap();

    tock.tock().args(&["sync"]).passes();

    assert_eq!(tock.crontab(), "# tock:edited\n15 7 * * * e.sh\n");
}

#[test]
fn sync_with_nothing_declared() {
    let tock = Tock::new();
    tock.tock()
        .args(&["sync"])
        .passes()
        .stdout_eq("Nothing to do\n");
}
