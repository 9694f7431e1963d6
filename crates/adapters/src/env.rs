// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::ffi::OsString;

fn program_override(var: &str) -> Option<OsString> {
    std::env::var_os(var).filter(|v| !v.is_empty())
}

/// Program invoked for the schtasks backend (default: `schtasks`).
pub fn schtasks_program() -> OsString {
    program_override("TOCK_SCHTASKS_BIN").unwrap_or_else(|| "schtasks".into())
}

/// Program invoked for the crontab backend (default: `crontab`).
pub fn crontab_program() -> OsString {
    program_override("TOCK_CRONTAB_BIN").unwrap_or_else(|| "crontab".into())
}
