// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Everything a command needs: file locations, settings and the scheduler.

use crate::config::{Config, Settings};
use crate::output::OutputFormat;
use anyhow::Context as _;
use std::path::{Path, PathBuf};
use tock_adapters::{SystemScheduler, TracedScheduler};
use tock_storage::{Store, StoreLock};

/// Files inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub store: PathBuf,
    pub config: PathBuf,
    pub log: PathBuf,
}

impl Paths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            store: data_dir.join("jobs.json"),
            config: data_dir.join("config.toml"),
            log: data_dir.join("tock.log"),
            data_dir,
        }
    }
}

pub struct Context {
    pub paths: Paths,
    pub settings: Settings,
    pub scheduler: TracedScheduler<SystemScheduler>,
    pub format: OutputFormat,
}

impl Context {
    pub fn load(format: OutputFormat) -> anyhow::Result<Self> {
        let paths = Paths::new(crate::env::state_dir()?);
        let settings = Config::load(&paths.config)?.resolve()?;
        Ok(Self::new(paths, settings, format))
    }

    pub fn new(paths: Paths, settings: Settings, format: OutputFormat) -> Self {
        let scheduler = TracedScheduler::new(SystemScheduler::new(
            settings.backend,
            &settings.folder,
            settings.timeout,
        ));
        Self {
            paths,
            settings,
            scheduler,
            format,
        }
    }

    /// Open the store for reading.
    pub fn open_store(&self) -> anyhow::Result<Store> {
        Ok(Store::open(&self.paths.store)?)
    }

    /// Open the store for a mutating command.
    ///
    /// The lock is held until the returned guard drops, serializing tock
    /// processes that share a data directory.
    pub fn lock_store(&self) -> anyhow::Result<(StoreLock, Store)> {
        let lock = acquire(&self.paths.store)?;
        let store = self.open_store()?;
        Ok((lock, store))
    }
}

fn acquire(store_path: &Path) -> anyhow::Result<StoreLock> {
    StoreLock::acquire(store_path)
        .with_context(|| format!("failed to lock job store {}", store_path.display()))
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
