// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable job store for tock

mod lock;
mod migration;
mod store;

pub use lock::StoreLock;
pub use migration::{MigrationError, MigrationRegistry};
pub use store::{decode, decode_drafts, load, save, Store, StoreError, CURRENT_STORE_VERSION};
