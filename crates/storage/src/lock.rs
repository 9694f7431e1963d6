// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inter-process lock serializing mutations of one store.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Exclusive advisory lock on `<store>.lock`, released on drop.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    file: File,
}

impl StoreLock {
    /// Block until the lock next to `store_path` is held.
    pub fn acquire(store_path: &Path) -> std::io::Result<Self> {
        let file = Self::open(store_path)?;
        file.lock_exclusive()?;
        Ok(Self {
            path: store_path.with_extension("lock"),
            file,
        })
    }

    /// Take the lock only if no other process holds it.
    pub fn try_acquire(store_path: &Path) -> std::io::Result<Self> {
        let file = Self::open(store_path)?;
        file.try_lock_exclusive()?;
        Ok(Self {
            path: store_path.with_extension("lock"),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(store_path: &Path) -> std::io::Result<File> {
        if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(store_path.with_extension("lock"))
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
