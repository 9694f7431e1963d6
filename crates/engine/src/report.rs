// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job results of intents and batch operations.

use serde::Serialize;
use tock_adapters::{SchedulerError, SchedulerErrorKind};
use tock_core::Job;

/// How `add_job`/`edit_job` changed the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Applied {
    Created,
    Replaced,
}

/// What a batch operation did (or would have done) for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// Declared but not registered (or forced): registered
    Register,
    /// Declared and already registered
    Unchanged,
    /// Registered but not declared: deregistered
    Prune,
    /// Registered but not declared: left alone
    Orphan,
    /// Added from an import file
    Import,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    /// The OS scheduler refused
    Failed {
        kind: SchedulerErrorKind,
        detail: String,
    },
    /// The job never passed validation
    Invalid { detail: String },
    /// Not attempted because the batch was cancelled
    Skipped,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. } | Outcome::Invalid { .. })
    }
}

impl From<&SchedulerError> for Outcome {
    fn from(err: &SchedulerError) -> Self {
        Outcome::Failed {
            kind: err.kind(),
            detail: err.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub name: String,
    pub action: SyncAction,
    pub outcome: Outcome,
}

/// Entries in processing order: declared jobs first, then orphans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub entries: Vec<JobReport>,
}

impl SyncReport {
    pub(crate) fn push(&mut self, name: impl Into<String>, action: SyncAction, outcome: Outcome) {
        self.entries.push(JobReport {
            name: name.into(),
            action,
            outcome,
        });
    }

    /// Entries whose job failed or was invalid.
    pub fn failed(&self) -> impl Iterator<Item = &JobReport> {
        self.entries.iter().filter(|e| e.outcome.is_failure())
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }

    pub fn get(&self, name: &str) -> Option<&JobReport> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of entries with `action` that succeeded.
    pub fn count_ok(&self, action: SyncAction) -> usize {
        self.entries
            .iter()
            .filter(|e| e.action == action && e.outcome == Outcome::Ok)
            .count()
    }
}

/// A declared job and whether the OS scheduler currently knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobStatus {
    pub job: Job,
    pub registered: bool,
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
