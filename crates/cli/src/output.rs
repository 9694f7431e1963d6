// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a one-line confirmation, or `value` as JSON.
pub fn print_confirmation<T: Serialize + ?Sized>(
    format: OutputFormat,
    text: &str,
    value: &T,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{text}");
            Ok(())
        }
        OutputFormat::Json => print_json(value),
    }
}

/// `count` followed by `noun`, pluralized with a trailing "s".
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
