// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock run` and `tock test`

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::time::Duration;
use tock_adapters::{test_run, TestRunOutput};
use tock_engine::{EngineError, Reconciler};

use crate::context::Context;
use crate::exit_error::ExitError;
use crate::output::{print_confirmation, print_json, OutputFormat};

#[derive(Args)]
pub struct RunArgs {
    /// Registered job to trigger
    pub name: String,
}

#[derive(Args)]
pub struct TestArgs {
    /// Declared job whose command to run here and now
    pub name: String,

    /// Seconds to wait before killing the command
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    pub timeout: u64,
}

#[derive(Serialize)]
struct Triggered<'a> {
    name: &'a str,
    triggered: bool,
}

#[derive(Serialize)]
struct TestResult<'a> {
    name: &'a str,
    exit_code: Option<i32>,
    stdout: &'a str,
    stderr: &'a str,
}

/// Trigger through the OS scheduler; the job must be registered there.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    Reconciler::new(&mut store, &ctx.scheduler)
        .run_now(&args.name)
        .await?;

    print_confirmation(
        ctx.format,
        &format!("Triggered job {}", args.name),
        &Triggered {
            name: &args.name,
            triggered: true,
        },
    )
}

/// Run the command locally without the OS scheduler.
///
/// Exits 1 when the command does not exit successfully.
pub async fn test(args: TestArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let job = store
        .get(&args.name)
        .ok_or_else(|| EngineError::UnknownJob(args.name.clone()))?;

    let output = test_run(job.command_line(), Duration::from_secs(args.timeout))
        .await
        .with_context(|| format!("could not run job {:?}", args.name))?;

    match ctx.format {
        OutputFormat::Text => print!("{}", render_test_output(&output)),
        OutputFormat::Json => print_json(&TestResult {
            name: job.name(),
            exit_code: output.exit_code,
            stdout: &output.stdout,
            stderr: &output.stderr,
        })?,
    }

    if output.success() {
        Ok(())
    } else {
        Err(ExitError::new(1, String::new()).into())
    }
}

fn render_test_output(output: &TestRunOutput) -> String {
    let mut text = String::new();
    for (label, stream) in [("stdout", &output.stdout), ("stderr", &output.stderr)] {
        if stream.is_empty() {
            continue;
        }
        text.push_str(&format!("--- {label} ---\n{stream}"));
        if !stream.ends_with('\n') {
            text.push('\n');
        }
    }
    match output.exit_code {
        Some(code) => text.push_str(&format!("exit code: {code}\n")),
        None => text.push_str("terminated by signal\n"),
    }
    text
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
