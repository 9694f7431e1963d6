// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use std::time::Duration;

/// Filter directives for the log file (`EnvFilter` syntax).
pub const LOG_FILTER_VAR: &str = "TOCK_LOG";

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

// --- Data directory ---

/// Resolve data directory: TOCK_STATE_DIR > platform data dir/tock > ~/.local/share/tock
pub fn state_dir() -> anyhow::Result<PathBuf> {
    if let Some(dir) = std::env::var_os("TOCK_STATE_DIR").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(data) = dirs::data_dir() {
        return Ok(data.join("tock"));
    }
    let home = std::env::var_os("HOME").ok_or_else(|| {
        anyhow::anyhow!("could not determine a data directory; set TOCK_STATE_DIR")
    })?;
    Ok(PathBuf::from(home).join(".local/share/tock"))
}

// --- Scheduler overrides ---

pub fn backend() -> Option<String> {
    std::env::var("TOCK_BACKEND").ok().filter(|s| !s.is_empty())
}

pub fn scheduler_timeout_ms() -> Option<Duration> {
    parse_duration_ms("TOCK_SCHEDULER_TIMEOUT_MS")
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}
