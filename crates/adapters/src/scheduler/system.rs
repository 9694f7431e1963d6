// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend selection

use super::{CrontabAdapter, NoOpScheduler, SchedulerAdapter, SchedulerError, SchtasksAdapter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tock_core::Job;

/// Which OS scheduler jobs are registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Schtasks,
    Crontab,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scheduler backend {0:?} (expected schtasks, crontab or none)")]
pub struct UnknownBackend(pub String);

impl Default for Backend {
    fn default() -> Self {
        if cfg!(windows) {
            Backend::Schtasks
        } else {
            Backend::Crontab
        }
    }
}

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "schtasks" => Ok(Backend::Schtasks),
            "crontab" | "cron" => Ok(Backend::Crontab),
            "none" | "off" => Ok(Backend::None),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Schtasks => "schtasks",
            Backend::Crontab => "crontab",
            Backend::None => "none",
        })
    }
}

/// The configured OS scheduler, dispatched statically.
#[derive(Clone, Debug)]
pub enum SystemScheduler {
    Schtasks(SchtasksAdapter),
    Crontab(CrontabAdapter),
    None(NoOpScheduler),
}

impl SystemScheduler {
    /// `folder` only applies to the schtasks backend.
    pub fn new(backend: Backend, folder: &str, timeout: Duration) -> Self {
        match backend {
            Backend::Schtasks => SystemScheduler::Schtasks(SchtasksAdapter::new(folder, timeout)),
            Backend::Crontab => SystemScheduler::Crontab(CrontabAdapter::new(timeout)),
            Backend::None => SystemScheduler::None(NoOpScheduler::new()),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            SystemScheduler::Schtasks(_) => Backend::Schtasks,
            SystemScheduler::Crontab(_) => Backend::Crontab,
            SystemScheduler::None(_) => Backend::None,
        }
    }
}

#[async_trait]
impl SchedulerAdapter for SystemScheduler {
    async fn register(&self, job: &Job) -> Result<(), SchedulerError> {
        match self {
            SystemScheduler::Schtasks(a) => a.register(job).await,
            SystemScheduler::Crontab(a) => a.register(job).await,
            SystemScheduler::None(a) => a.register(job).await,
        }
    }

    async fn deregister(&self, name: &str) -> Result<(), SchedulerError> {
        match self {
            SystemScheduler::Schtasks(a) => a.deregister(name).await,
            SystemScheduler::Crontab(a) => a.deregister(name).await,
            SystemScheduler::None(a) => a.deregister(name).await,
        }
    }

    async fn run_now(&self, name: &str) -> Result<(), SchedulerError> {
        match self {
            SystemScheduler::Schtasks(a) => a.run_now(name).await,
            SystemScheduler::Crontab(a) => a.run_now(name).await,
            SystemScheduler::None(a) => a.run_now(name).await,
        }
    }

    async fn list_registered(&self) -> Result<BTreeSet<String>, SchedulerError> {
        match self {
            SystemScheduler::Schtasks(a) => a.list_registered().await,
            SystemScheduler::Crontab(a) => a.list_registered().await,
            SystemScheduler::None(a) => a.list_registered().await,
        }
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
