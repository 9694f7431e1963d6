// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use thiserror::Error;
use tock_adapters::{SchedulerError, SchedulerErrorKind};
use tock_core::ValidationError;
use tock_storage::StoreError;

/// Errors that abort a single intent
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid job: {0}")]
    Validation(#[from] ValidationError),
    #[error("job store: {0}")]
    Store(#[from] StoreError),
    #[error("scheduler failed for job {name:?}")]
    Scheduler {
        name: String,
        #[source]
        source: SchedulerError,
    },
    #[error("could not list registered tasks")]
    List(#[source] SchedulerError),
    #[error("no job named {0:?}")]
    UnknownJob(String),
}

impl EngineError {
    pub(crate) fn scheduler(name: &str, source: SchedulerError) -> Self {
        EngineError::Scheduler {
            name: name.to_string(),
            source,
        }
    }

    /// The scheduler failure kind, if the OS scheduler caused this error.
    pub fn scheduler_kind(&self) -> Option<SchedulerErrorKind> {
        match self {
            EngineError::Scheduler { source, .. } | EngineError::List(source) => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}
