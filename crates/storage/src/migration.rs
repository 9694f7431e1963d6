// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store schema migration.
//!
//! Migrations transform the store JSON from one version to the next and the
//! registry chains them to reach the current version. A document without a
//! `"v"` key is version 1: the flat `daily`/`days` job records written by the
//! Tk front-end that preceded tock.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Errors that can occur during migration
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration v{from}→v{to} failed: {reason}")]
    Failed { from: u32, to: u32, reason: String },
    #[error("no migration path from v{0} to v{1}")]
    NoPath(u32, u32),
    #[error("store version {0} is newer than supported ({1})")]
    TooNew(u32, u32),
    #[error("invalid store version {0}")]
    InvalidVersion(Value),
}

/// A migration from one store version to the next.
pub trait Migration: Send + Sync {
    fn source_version(&self) -> u32;
    fn target_version(&self) -> u32;
    fn migrate(&self, doc: &mut Value) -> Result<(), MigrationError>;
}

/// Registry of migrations for upgrading stores.
pub struct MigrationRegistry {
    migrations: Vec<Box<dyn Migration>>,
}

impl MigrationRegistry {
    /// Create a new registry with all known migrations.
    pub fn new() -> Self {
        Self {
            migrations: vec![Box::new(FlagsToSchedule)],
        }
    }

    /// Migrate a store document to the target version.
    pub fn migrate_to(&self, mut doc: Value, target: u32) -> Result<Value, MigrationError> {
        let current = version_of(&doc)?;

        if current == target {
            return Ok(doc);
        }
        if current > target {
            return Err(MigrationError::TooNew(current, target));
        }

        let mut version = current;
        while version < target {
            let migration = self
                .migrations
                .iter()
                .find(|m| m.source_version() == version)
                .ok_or(MigrationError::NoPath(version, target))?;

            migration.migrate(&mut doc)?;
            version = migration.target_version();

            if let Some(obj) = doc.as_object_mut() {
                obj.insert("v".into(), version.into());
            }
        }
        Ok(doc)
    }
}

/// The document's schema version. Only a missing `"v"` means version 1.
fn version_of(doc: &Value) -> Result<u32, MigrationError> {
    match doc.get("v") {
        None => Ok(1),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|&n| n >= 1)
            .ok_or_else(|| MigrationError::InvalidVersion(v.clone())),
    }
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// v1 → v2: `{"daily": bool, "days": [..]}` becomes a tagged `schedule`.
struct FlagsToSchedule;

impl FlagsToSchedule {
    fn fail(reason: impl Into<String>) -> MigrationError {
        MigrationError::Failed {
            from: 1,
            to: 2,
            reason: reason.into(),
        }
    }

    fn migrate_job(index: usize, job: &mut Map<String, Value>) -> Result<(), MigrationError> {
        if job.contains_key("schedule") {
            return Err(Self::fail(format!(
                "job {index}: unversioned document carries a `schedule`; add \"v\": 2"
            )));
        }
        let daily = match job.remove("daily") {
            None => true,
            Some(Value::Bool(b)) => b,
            Some(other) => {
                return Err(Self::fail(format!(
                    "job {index}: `daily` must be a boolean, got {other}"
                )));
            }
        };
        let days = match job.remove("days") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(days)) => days,
            Some(other) => {
                return Err(Self::fail(format!(
                    "job {index}: `days` must be a list, got {other}"
                )));
            }
        };

        let schedule = if daily {
            json!({ "kind": "daily" })
        } else if days.is_empty() {
            return Err(Self::fail(format!(
                "job {index}: neither daily nor any weekday selected"
            )));
        } else {
            json!({ "kind": "weekly", "days": days })
        };
        job.insert("schedule".into(), schedule);
        Ok(())
    }
}

impl Migration for FlagsToSchedule {
    fn source_version(&self) -> u32 {
        1
    }

    fn target_version(&self) -> u32 {
        2
    }

    fn migrate(&self, doc: &mut Value) -> Result<(), MigrationError> {
        let jobs = doc
            .get_mut("jobs")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| Self::fail("missing `jobs` list"))?;

        for (index, job) in jobs.iter_mut().enumerate() {
            let job = job
                .as_object_mut()
                .ok_or_else(|| Self::fail(format!("job {index} is not an object")))?;
            Self::migrate_job(index, job)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
