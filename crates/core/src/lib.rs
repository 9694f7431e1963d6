// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tock-core: job model and validation for the tock scheduler tool

pub mod command;
pub mod job;
pub mod schedule;
pub mod validate;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use command::CommandLine;
pub use job::{Job, JobDraft};
pub use schedule::{JobTime, Schedule, UnknownWeekday, Weekday};
pub use validate::{validate, ValidationError, MAX_NAME_LEN, RESERVED_NAME_CHARS};
