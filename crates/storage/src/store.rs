// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent name → job mapping.
//!
//! The store is a single pretty-printed JSON document. Every save writes a
//! `.tmp` sibling, fsyncs it and renames it over the previous file, so a
//! crash mid-write leaves the last committed state intact. Loading never
//! repairs: anything that does not decode to a valid job list is reported as
//! [`StoreError::Corrupt`] and the file is left untouched.

use crate::migration::MigrationRegistry;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tock_core::{Job, JobDraft};
use tracing::debug;

/// Schema version written by this build.
pub const CURRENT_STORE_VERSION: u32 = 2;

/// Errors that can occur in store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt job store {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("a job named {0:?} already exists")]
    Duplicate(String),
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    v: u32,
    saved_at: DateTime<Utc>,
    jobs: Vec<&'a Job>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoreFile<J> {
    #[allow(dead_code)]
    v: u32,
    #[serde(default)]
    #[allow(dead_code)]
    saved_at: Option<DateTime<Utc>>,
    jobs: Vec<J>,
}

/// Load the mapping at `path`.
///
/// A missing or blank file is the first-run case and yields an empty mapping.
pub fn load(path: &Path) -> Result<IndexMap<String, Job>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(IndexMap::new()),
        Err(e) => return Err(e.into()),
    };
    decode(&text, path)
}

/// Decode store text of any supported schema version.
///
/// `origin` only labels errors.
pub fn decode(text: &str, origin: &Path) -> Result<IndexMap<String, Job>, StoreError> {
    let Some(jobs) = decode_records::<Job>(text, origin)? else {
        return Ok(IndexMap::new());
    };

    let mut mapping = IndexMap::with_capacity(jobs.len());
    for job in jobs {
        let name = job.name().to_string();
        if mapping.insert(name.clone(), job).is_some() {
            return Err(corrupt(origin, format!("duplicate job name {name:?}")));
        }
    }
    Ok(mapping)
}

/// Decode store text into unvalidated drafts, in file order.
///
/// Used for imports: records that fail validation are kept so the caller can
/// report them one by one. Only structural problems fail the whole document.
pub fn decode_drafts(text: &str, origin: &Path) -> Result<Vec<JobDraft>, StoreError> {
    Ok(decode_records(text, origin)?.unwrap_or_default())
}

fn decode_records<J: DeserializeOwned>(
    text: &str,
    origin: &Path,
) -> Result<Option<Vec<J>>, StoreError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let doc: serde_json::Value =
        serde_json::from_str(text).map_err(|e| corrupt(origin, e.to_string()))?;
    if !doc.is_object() {
        return Err(corrupt(origin, "expected a JSON object at the top level"));
    }

    let doc = MigrationRegistry::new()
        .migrate_to(doc, CURRENT_STORE_VERSION)
        .map_err(|e| corrupt(origin, e.to_string()))?;
    let file: StoreFile<J> =
        serde_json::from_value(doc).map_err(|e| corrupt(origin, e.to_string()))?;
    Ok(Some(file.jobs))
}

fn corrupt(origin: &Path, reason: impl Into<String>) -> StoreError {
    StoreError::Corrupt {
        path: origin.to_path_buf(),
        reason: reason.into(),
    }
}

/// Atomically replace the mapping at `path` (write to .tmp, then rename).
pub fn save(path: &Path, jobs: &IndexMap<String, Job>) -> Result<(), StoreError> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    let doc = StoreFileRef {
        v: CURRENT_STORE_VERSION,
        saved_at: Utc::now(),
        jobs: jobs.values().collect(),
    };

    // Write to temp file and sync
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &doc)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)?;

    // Make the rename itself durable
    #[cfg(unix)]
    {
        if let Some(parent) = parent {
            File::open(parent)?.sync_all()?;
        }
    }

    debug!(path = %path.display(), jobs = jobs.len(), "store saved");
    Ok(())
}

/// The declared jobs, owned exclusively by the store.
///
/// Mutations persist before they take effect in memory: if the save fails,
/// the in-memory view still matches the file.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    jobs: IndexMap<String, Job>,
}

impl Store {
    /// Open the store at `path`, loading whatever is committed there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let jobs = load(&path)?;
        Ok(Self { path, jobs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the committed state from disk.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.jobs = load(&self.path)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Job> {
        self.jobs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.jobs.contains_key(name)
    }

    /// Jobs in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    pub fn jobs(&self) -> &IndexMap<String, Job> {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Insert or replace a job by name, returning the previous version.
    ///
    /// A replaced job keeps its position; a new job is appended.
    pub fn upsert(&mut self, job: Job) -> Result<Option<Job>, StoreError> {
        let mut next = self.jobs.clone();
        let previous = next.insert(job.name().to_string(), job);
        self.commit(next)?;
        Ok(previous)
    }

    /// Replace `old_name` with `job`, which may carry a different name.
    ///
    /// The job keeps the position of the one it replaces. Returns the
    /// replaced job, or `None` (and appends) when `old_name` was unknown.
    pub fn replace(&mut self, old_name: &str, job: Job) -> Result<Option<Job>, StoreError> {
        if job.name() == old_name {
            return self.upsert(job);
        }
        if self.jobs.contains_key(job.name()) {
            return Err(StoreError::Duplicate(job.name().to_string()));
        }

        let mut next = self.jobs.clone();
        let previous = match next.shift_remove_full(old_name) {
            Some((index, _, previous)) => {
                next.shift_insert(index, job.name().to_string(), job);
                Some(previous)
            }
            None => {
                next.insert(job.name().to_string(), job);
                None
            }
        };
        self.commit(next)?;
        Ok(previous)
    }

    /// Remove a job by name. Unknown names are not an error.
    pub fn remove(&mut self, name: &str) -> Result<Option<Job>, StoreError> {
        if !self.jobs.contains_key(name) {
            return Ok(None);
        }
        let mut next = self.jobs.clone();
        let removed = next.shift_remove(name);
        self.commit(next)?;
        Ok(removed)
    }

    fn commit(&mut self, next: IndexMap<String, Job>) -> Result<(), StoreError> {
        save(&self.path, &next)?;
        self.jobs = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
