// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::scheduler::{SchedulerAdapter, SchedulerError};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tock_core::Job;
use tracing::Instrument;

/// Wrapper that adds tracing to any SchedulerAdapter
#[derive(Clone, Debug)]
pub struct TracedScheduler<S> {
    inner: S,
}

impl<S> TracedScheduler<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: SchedulerAdapter> SchedulerAdapter for TracedScheduler<S> {
    async fn register(&self, job: &Job) -> Result<(), SchedulerError> {
        let span = tracing::info_span!(
            "scheduler.register",
            name = job.name(),
            time = %job.time(),
            schedule = %job.schedule()
        );
        async {
            tracing::info!(command = job.command(), "starting");
            let start = std::time::Instant::now();
            let result = self.inner.register(job).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "registered"),
                Err(e) => {
                    tracing::error!(elapsed_ms, kind = %e.kind(), error = %e, "register failed")
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn deregister(&self, name: &str) -> Result<(), SchedulerError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.deregister(name).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "deregistered"),
                Err(e) => {
                    tracing::error!(elapsed_ms, kind = %e.kind(), error = %e, "deregister failed")
                }
            }
            result
        }
        .instrument(tracing::info_span!("scheduler.deregister", name))
        .await
    }

    async fn run_now(&self, name: &str) -> Result<(), SchedulerError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.run_now(name).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "triggered"),
                Err(e) => tracing::warn!(elapsed_ms, kind = %e.kind(), error = %e, "run failed"),
            }
            result
        }
        .instrument(tracing::info_span!("scheduler.run_now", name))
        .await
    }

    async fn list_registered(&self) -> Result<BTreeSet<String>, SchedulerError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.list_registered().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(names) => tracing::debug!(elapsed_ms, count = names.len(), "listed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "list failed"),
            }
            result
        }
        .instrument(tracing::debug_span!("scheduler.list"))
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
