// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command handlers

pub mod job;
pub mod list;
pub mod run;
pub mod sync;
