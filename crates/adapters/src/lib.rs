// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters between declared jobs and the OS task scheduler

mod env;
pub mod local;
pub mod scheduler;
pub mod subprocess;
pub mod traced;

pub use local::{test_run, TestRunOutput};
pub use scheduler::{
    Backend, CrontabAdapter, NoOpScheduler, SchedulerAdapter, SchedulerError, SchedulerErrorKind,
    SchtasksAdapter, SystemScheduler, UnknownBackend,
};
pub use traced::TracedScheduler;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use scheduler::{FakeScheduler, SchedulerCall, SchedulerOp};
