// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{Applied, Reconciler, SyncOptions, SyncReport};
use std::path::PathBuf;
use tempfile::TempDir;
use tock_adapters::FakeScheduler;
use tock_core::JobDraft;
use tock_storage::Store;

/// Test context holding a store in a temp dir and a fake scheduler.
pub(crate) struct TestContext {
    _dir: TempDir,
    pub path: PathBuf,
    pub store: Store,
    pub scheduler: FakeScheduler,
}

impl TestContext {
    pub fn reconciler(&mut self) -> Reconciler<'_, FakeScheduler> {
        Reconciler::new(&mut self.store, &self.scheduler)
    }

    pub async fn add(&mut self, draft: JobDraft) -> Applied {
        self.reconciler().add_job(draft).await.unwrap()
    }

    pub async fn reload(&mut self, options: &SyncOptions) -> SyncReport {
        self.reconciler().reload(options).await.unwrap()
    }

    /// Job names as committed on disk, in order.
    pub fn names_on_disk(&self) -> Vec<String> {
        tock_storage::load(&self.path)
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }
}

pub(crate) fn setup() -> TestContext {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    let store = Store::open(&path).unwrap();
    TestContext {
        _dir: dir,
        path,
        store,
        scheduler: FakeScheduler::new(),
    }
}

/// The daily job from the original front-end's first-run example.
pub(crate) fn backup_draft(time: &str) -> JobDraft {
    JobDraft::daily("Backup", r"C:\Program Files\App\app.exe --flag", time)
}
