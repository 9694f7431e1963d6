// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op scheduler adapter for when OS registration is disabled.

use super::{SchedulerAdapter, SchedulerError};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tock_core::Job;

/// Scheduler adapter that registers nothing.
///
/// Used with `backend = "none"`: jobs are still declared and persisted but
/// never reach the OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpScheduler;

impl NoOpScheduler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SchedulerAdapter for NoOpScheduler {
    async fn register(&self, _job: &Job) -> Result<(), SchedulerError> {
        Ok(())
    }

    async fn deregister(&self, _name: &str) -> Result<(), SchedulerError> {
        Ok(())
    }

    async fn run_now(&self, name: &str) -> Result<(), SchedulerError> {
        Err(SchedulerError::NotFound(format!(
            "{name:?} (scheduler backend is disabled)"
        )))
    }

    async fn list_registered(&self) -> Result<BTreeSet<String>, SchedulerError> {
        Ok(BTreeSet::new())
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
