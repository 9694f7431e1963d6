// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake scheduler adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SchedulerAdapter, SchedulerError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tock_core::Job;

/// Recorded scheduler call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerCall {
    Register { name: String, command: String },
    Deregister { name: String },
    RunNow { name: String },
    List,
}

/// Operation selector for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerOp {
    Register,
    Deregister,
    RunNow,
    List,
}

struct Injected {
    op: SchedulerOp,
    name: Option<String>,
    error: SchedulerError,
}

#[derive(Default)]
struct FakeSchedulerState {
    registered: BTreeMap<String, Job>,
    calls: Vec<SchedulerCall>,
    failures: Vec<Injected>,
}

/// Fake scheduler adapter for testing
#[derive(Clone, Default)]
pub struct FakeScheduler {
    inner: Arc<Mutex<FakeSchedulerState>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SchedulerCall> {
        self.inner.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }

    /// Registered names, sorted
    pub fn registered(&self) -> Vec<String> {
        self.inner.lock().registered.keys().cloned().collect()
    }

    /// The job a name is registered with
    pub fn registration(&self, name: &str) -> Option<Job> {
        self.inner.lock().registered.get(name).cloned()
    }

    /// Add a registration behind the caller's back (e.g. an orphan)
    pub fn insert_registration(&self, job: Job) {
        self.inner
            .lock()
            .registered
            .insert(job.name().to_string(), job);
    }

    /// Drop a registration behind the caller's back (e.g. removed by hand)
    pub fn remove_registration(&self, name: &str) {
        self.inner.lock().registered.remove(name);
    }

    /// Fail `op` for `name` with `error` until cleared
    pub fn fail_on(&self, op: SchedulerOp, name: &str, error: SchedulerError) {
        self.inner.lock().failures.push(Injected {
            op,
            name: Some(name.to_string()),
            error,
        });
    }

    /// Fail `op` for every name with `error` until cleared
    pub fn fail_all(&self, op: SchedulerOp, error: SchedulerError) {
        self.inner.lock().failures.push(Injected {
            op,
            name: None,
            error,
        });
    }

    pub fn clear_failures(&self) {
        self.inner.lock().failures.clear();
    }

    fn injected(
        state: &FakeSchedulerState,
        op: SchedulerOp,
        name: Option<&str>,
    ) -> Option<SchedulerError> {
        state
            .failures
            .iter()
            .find(|f| f.op == op && (f.name.is_none() || f.name.as_deref() == name))
            .map(|f| f.error.clone())
    }
}

#[async_trait]
impl SchedulerAdapter for FakeScheduler {
    async fn register(&self, job: &Job) -> Result<(), SchedulerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SchedulerCall::Register {
            name: job.name().to_string(),
            command: job.command_line().to_command_string(),
        });
        if let Some(err) = Self::injected(&inner, SchedulerOp::Register, Some(job.name())) {
            return Err(err);
        }
        inner.registered.insert(job.name().to_string(), job.clone());
        Ok(())
    }

    async fn deregister(&self, name: &str) -> Result<(), SchedulerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SchedulerCall::Deregister {
            name: name.to_string(),
        });
        if let Some(err) = Self::injected(&inner, SchedulerOp::Deregister, Some(name)) {
            return Err(err);
        }
        inner.registered.remove(name);
        Ok(())
    }

    async fn run_now(&self, name: &str) -> Result<(), SchedulerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SchedulerCall::RunNow {
            name: name.to_string(),
        });
        if let Some(err) = Self::injected(&inner, SchedulerOp::RunNow, Some(name)) {
            return Err(err);
        }
        if !inner.registered.contains_key(name) {
            return Err(SchedulerError::NotFound(name.to_string()));
        }
        Ok(())
    }

    async fn list_registered(&self) -> Result<BTreeSet<String>, SchedulerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SchedulerCall::List);
        if let Some(err) = Self::injected(&inner, SchedulerOp::List, None) {
            return Err(err);
        }
        Ok(inner.registered.keys().cloned().collect())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
