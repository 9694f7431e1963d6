// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `config.toml` in the data directory, with environment overrides.
//!
//! ```toml
//! [scheduler]
//! backend = "schtasks"   # schtasks | crontab | none
//! folder = "Tock"        # schtasks task folder
//! timeout_ms = 10000     # per scheduler command
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tock_adapters::scheduler::DEFAULT_FOLDER;
use tock_adapters::subprocess::SCHEDULER_TIMEOUT;
use tock_adapters::Backend;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Platform default when unset
    pub backend: Option<Backend>,
    pub folder: String,
    pub timeout_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            backend: None,
            folder: DEFAULT_FOLDER.to_string(),
            timeout_ms: SCHEDULER_TIMEOUT.as_millis() as u64,
        }
    }
}

/// Effective scheduler settings after config and environment are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: Backend,
    pub folder: String,
    pub timeout: Duration,
}

impl Config {
    /// Load `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Merge with `TOCK_BACKEND` and `TOCK_SCHEDULER_TIMEOUT_MS`.
    pub fn resolve(self) -> anyhow::Result<Settings> {
        self.resolve_with(
            crate::env::backend().as_deref(),
            crate::env::scheduler_timeout_ms(),
        )
    }

    /// Environment values win over the file.
    pub fn resolve_with(
        self,
        backend: Option<&str>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Settings> {
        let backend = match backend {
            Some(name) => name.parse().context("invalid TOCK_BACKEND")?,
            None => self.scheduler.backend.unwrap_or_default(),
        };
        let folder = self.scheduler.folder.trim_matches('\\').to_string();
        if folder.is_empty() {
            anyhow::bail!("scheduler.folder must not be empty");
        }
        let timeout =
            timeout.unwrap_or_else(|| Duration::from_millis(self.scheduler.timeout_ms));
        if timeout.is_zero() {
            anyhow::bail!("scheduler timeout must be greater than zero");
        }
        Ok(Settings {
            backend,
            folder,
            timeout,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
