// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tock reconciliation engine
//!
//! Keeps the declared jobs in the store and the registrations in the OS
//! scheduler in agreement, one caller intent at a time.

mod cancel;
mod error;
mod reconciler;
mod report;
mod sync;

#[cfg(test)]
mod test_helpers;

pub use cancel::CancelToken;
pub use error::EngineError;
pub use reconciler::Reconciler;
pub use report::{Applied, JobReport, JobStatus, Outcome, SyncAction, SyncReport};
pub use sync::SyncOptions;
