// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.
#![allow(clippy::expect_used)]

use crate::{Job, JobDraft, Weekday};

/// A validated daily job running `<name>.exe` at `time`.
pub fn daily(name: &str, time: &str) -> Job {
    job(JobDraft::daily(name, format!("{name}.exe"), time))
}

/// A validated weekly job running `<name>.exe` at `time` on `days`.
pub fn weekly(name: &str, time: &str, days: &[Weekday]) -> Job {
    job(JobDraft::weekly(
        name,
        format!("{name}.exe"),
        time,
        days.iter().copied(),
    ))
}

/// Validate a draft that the test knows to be valid.
pub fn job(draft: JobDraft) -> Job {
    Job::try_from(draft).expect("test job should validate")
}
