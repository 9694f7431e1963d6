// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-job intents
//!
//! Ordering rules shared by every intent:
//! - validation failures abort before anything is touched;
//! - the store is written before the scheduler is asked to register, so a
//!   refused registration leaves the job declared (and `sync` can retry it);
//! - deregistration happens before the store forgets a job, so a refused
//!   deregistration never leaves an untracked task behind.

use crate::error::EngineError;
use crate::report::Applied;
use tock_adapters::SchedulerAdapter;
use tock_core::{validate, Job, JobDraft, ValidationError};
use tock_storage::Store;
use tracing::{info, warn};

/// Applies caller intents to a store and an OS scheduler.
///
/// Holds the store mutably for its whole lifetime, so intents against one
/// store never interleave.
pub struct Reconciler<'a, S> {
    pub(crate) store: &'a mut Store,
    pub(crate) scheduler: &'a S,
}

impl<'a, S: SchedulerAdapter> Reconciler<'a, S> {
    pub fn new(store: &'a mut Store, scheduler: &'a S) -> Self {
        Self { store, scheduler }
    }

    pub fn store(&self) -> &Store {
        self.store
    }

    /// Declare a job and register it.
    ///
    /// A job with the same name is replaced in place. If registration fails
    /// the job stays persisted and the scheduler error is returned.
    pub async fn add_job(&mut self, draft: JobDraft) -> Result<Applied, EngineError> {
        let job = validate(draft)?;
        let previous = self.store.upsert(job.clone())?;
        let applied = if previous.is_some() {
            Applied::Replaced
        } else {
            Applied::Created
        };
        info!(name = job.name(), ?applied, "job declared");

        self.register(&job).await?;
        Ok(applied)
    }

    /// Replace the job called `name` with `draft`, which may rename it.
    pub async fn edit_job(&mut self, name: &str, draft: JobDraft) -> Result<Applied, EngineError> {
        if !self.store.contains(name) {
            return Err(EngineError::UnknownJob(name.to_string()));
        }
        let job = validate(draft)?;
        let renamed = job.name() != name;
        if renamed && self.store.contains(job.name()) {
            return Err(ValidationError::DuplicateName(job.name().to_string()).into());
        }

        if renamed {
            self.scheduler
                .deregister(name)
                .await
                .map_err(|e| EngineError::scheduler(name, e))?;
        }
        self.store.replace(name, job.clone())?;
        info!(name, new_name = job.name(), "job edited");

        self.register(&job).await?;
        Ok(Applied::Replaced)
    }

    /// Deregister and forget the job called `name`.
    pub async fn delete_job(&mut self, name: &str) -> Result<Job, EngineError> {
        if !self.store.contains(name) {
            return Err(EngineError::UnknownJob(name.to_string()));
        }
        self.scheduler
            .deregister(name)
            .await
            .map_err(|e| EngineError::scheduler(name, e))?;

        let removed = self
            .store
            .remove(name)?
            .ok_or_else(|| EngineError::UnknownJob(name.to_string()))?;
        info!(name, "job deleted");
        Ok(removed)
    }

    /// Ask the OS scheduler to run `name` now. The store is not consulted.
    pub async fn run_now(&self, name: &str) -> Result<(), EngineError> {
        self.scheduler
            .run_now(name)
            .await
            .map_err(|e| EngineError::scheduler(name, e))?;
        info!(name, "run triggered");
        Ok(())
    }

    async fn register(&self, job: &Job) -> Result<(), EngineError> {
        self.scheduler.register(job).await.map_err(|e| {
            warn!(name = job.name(), error = %e, "registration failed, job stays declared");
            EngineError::scheduler(job.name(), e)
        })
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
