// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OS task scheduler adapters

mod crontab;
mod noop;
mod schtasks;
mod system;

pub use crontab::CrontabAdapter;
pub use noop::NoOpScheduler;
pub use schtasks::{SchtasksAdapter, DEFAULT_FOLDER};
pub use system::{Backend, SystemScheduler, UnknownBackend};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeScheduler, SchedulerCall, SchedulerOp};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tock_core::Job;

/// Errors from scheduler operations, each carrying the OS message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("scheduler rejected arguments: {0}")]
    InvalidArguments(String),
    #[error("scheduler unavailable: {0}")]
    Unavailable(String),
}

/// Serializable discriminant of [`SchedulerError`], used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerErrorKind {
    NotFound,
    PermissionDenied,
    InvalidArguments,
    Unavailable,
}

impl SchedulerError {
    pub fn kind(&self) -> SchedulerErrorKind {
        match self {
            SchedulerError::NotFound(_) => SchedulerErrorKind::NotFound,
            SchedulerError::PermissionDenied(_) => SchedulerErrorKind::PermissionDenied,
            SchedulerError::InvalidArguments(_) => SchedulerErrorKind::InvalidArguments,
            SchedulerError::Unavailable(_) => SchedulerErrorKind::Unavailable,
        }
    }

    /// The OS message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            SchedulerError::NotFound(m)
            | SchedulerError::PermissionDenied(m)
            | SchedulerError::InvalidArguments(m)
            | SchedulerError::Unavailable(m) => m,
        }
    }
}

impl fmt::Display for SchedulerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchedulerErrorKind::NotFound => "not_found",
            SchedulerErrorKind::PermissionDenied => "permission_denied",
            SchedulerErrorKind::InvalidArguments => "invalid_arguments",
            SchedulerErrorKind::Unavailable => "unavailable",
        })
    }
}

/// Adapter for the host's task scheduler (schtasks, crontab, etc.)
///
/// Implementations only see names inside their own namespace (a task
/// folder, a crontab marker) and never touch other tasks on the host.
#[async_trait]
pub trait SchedulerAdapter: Clone + Send + Sync + 'static {
    /// Create or overwrite the registration for `job`.
    ///
    /// Any stale registration of the same name is removed first, so calling
    /// this twice with the same job leaves exactly one entry.
    async fn register(&self, job: &Job) -> Result<(), SchedulerError>;

    /// Remove the registration for `name`. Unknown names are success.
    async fn deregister(&self, name: &str) -> Result<(), SchedulerError>;

    /// Trigger immediate execution; returns once the trigger is accepted.
    async fn run_now(&self, name: &str) -> Result<(), SchedulerError>;

    /// Names currently registered in this application's namespace.
    async fn list_registered(&self) -> Result<BTreeSet<String>, SchedulerError>;

    async fn is_registered(&self, name: &str) -> Result<bool, SchedulerError> {
        Ok(self.list_registered().await?.contains(name))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
