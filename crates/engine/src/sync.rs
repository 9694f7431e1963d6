// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch operations: reload, import and status.
//!
//! One job's failure never stops the others. Per-job scheduler failures are
//! recorded in the [`SyncReport`]; only failures that make the whole batch
//! meaningless (unreadable store, unlistable scheduler) are errors.

use crate::cancel::CancelToken;
use crate::error::EngineError;
use crate::reconciler::Reconciler;
use crate::report::{JobStatus, Outcome, SyncAction, SyncReport};
use std::collections::BTreeSet;
use tock_adapters::SchedulerAdapter;
use tock_core::{validate, Job, JobDraft};
use tracing::{info, warn};

/// Options for [`Reconciler::reload`] and [`Reconciler::import`].
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Deregister tasks in our namespace that no job declares
    pub prune: bool,
    /// Re-register jobs that already appear registered
    pub force: bool,
    pub cancel: CancelToken,
}

impl<S: SchedulerAdapter> Reconciler<'_, S> {
    /// Re-read the store and make the scheduler match it.
    pub async fn reload(&mut self, options: &SyncOptions) -> Result<SyncReport, EngineError> {
        self.store.reload()?;
        let registered = self.list().await?;
        let declared: Vec<Job> = self.store.list().cloned().collect();
        let mut report = SyncReport::default();

        for job in &declared {
            let already = registered.contains(job.name());
            let action = if already && !options.force {
                SyncAction::Unchanged
            } else {
                SyncAction::Register
            };

            let outcome = if options.cancel.is_cancelled() {
                Outcome::Skipped
            } else if action == SyncAction::Unchanged {
                Outcome::Ok
            } else {
                self.register_outcome(job).await
            };
            report.push(job.name(), action, outcome);
        }

        let orphans = registered
            .iter()
            .filter(|name| !self.store.contains(name.as_str()));
        for name in orphans {
            let action = if options.prune {
                SyncAction::Prune
            } else {
                SyncAction::Orphan
            };

            let outcome = if options.cancel.is_cancelled() {
                Outcome::Skipped
            } else if options.prune {
                match self.scheduler.deregister(name).await {
                    Ok(()) => Outcome::Ok,
                    Err(e) => {
                        warn!(name = name.as_str(), error = %e, "prune failed");
                        Outcome::from(&e)
                    }
                }
            } else {
                warn!(name = name.as_str(), "registered task has no declared job");
                Outcome::Ok
            };
            report.push(name.as_str(), action, outcome);
        }

        info!(
            entries = report.entries.len(),
            failed = report.failed().count(),
            "reload finished"
        );
        Ok(report)
    }

    /// Add every draft, each independently.
    ///
    /// Invalid drafts and refused registrations become report entries. A
    /// store write failure aborts the batch, since no later job could be
    /// persisted either.
    pub async fn import(
        &mut self,
        drafts: Vec<JobDraft>,
        options: &SyncOptions,
    ) -> Result<SyncReport, EngineError> {
        let mut report = SyncReport::default();

        for draft in drafts {
            if options.cancel.is_cancelled() {
                report.push(draft.name, SyncAction::Import, Outcome::Skipped);
                continue;
            }
            let name = draft.name.clone();
            let job = match validate(draft) {
                Ok(job) => job,
                Err(e) => {
                    warn!(name = name.as_str(), error = %e, "skipping invalid job");
                    report.push(
                        name,
                        SyncAction::Import,
                        Outcome::Invalid {
                            detail: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            self.store.upsert(job.clone())?;
            let outcome = self.register_outcome(&job).await;
            report.push(name, SyncAction::Import, outcome);
        }

        info!(
            entries = report.entries.len(),
            failed = report.failed().count(),
            "import finished"
        );
        Ok(report)
    }

    /// Every declared job with its observed registration state.
    pub async fn status(&self) -> Result<Vec<JobStatus>, EngineError> {
        let registered = self.list().await?;
        Ok(self
            .store
            .list()
            .map(|job| JobStatus {
                registered: registered.contains(job.name()),
                job: job.clone(),
            })
            .collect())
    }

    async fn list(&self) -> Result<BTreeSet<String>, EngineError> {
        self.scheduler
            .list_registered()
            .await
            .map_err(EngineError::List)
    }

    async fn register_outcome(&self, job: &Job) -> Outcome {
        match self.scheduler.register(job).await {
            Ok(()) => Outcome::Ok,
            Err(e) => {
                warn!(name = job.name(), error = %e, "registration failed");
                Outcome::from(&e)
            }
        }
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
