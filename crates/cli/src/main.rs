// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tock - keep OS scheduled tasks in line with declared jobs

mod color;
mod commands;
mod config;
mod context;
mod env;
mod exit_error;
mod logging;
mod output;
mod table;

use output::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{job, list, run, sync};

use crate::context::Context;

#[derive(Parser)]
#[command(
    name = "tock",
    version,
    about = "Tock - declare scheduled jobs and keep the OS scheduler in sync"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Declare a job and register it with the OS scheduler
    Add(job::AddArgs),
    /// Change a declared job; unspecified fields keep their value
    Edit(job::EditArgs),
    /// Deregister a job and forget it
    Delete(job::DeleteArgs),
    /// Trigger a registered job through the OS scheduler now
    Run(run::RunArgs),
    /// Run a job's command locally and show its output
    Test(run::TestArgs),
    /// List declared jobs and whether they are registered
    List,
    /// Make the OS scheduler match the declared jobs
    Sync(sync::SyncArgs),
    /// Declare every job in a job file
    Import(sync::ImportArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain. Otherwise the full chain is rendered so context
/// isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let ctx = Context::load(cli.output)?;
    // Logging is best effort; commands still work with an unwritable log
    let _log_guard = logging::setup(&ctx.paths.log).ok();
    tracing::debug!(
        data_dir = %ctx.paths.data_dir.display(),
        backend = %ctx.settings.backend,
        "tock starting"
    );

    match command {
        // Mutations hold the store lock
        Commands::Add(args) => job::add(args, &ctx).await,
        Commands::Edit(args) => job::edit(args, &ctx).await,
        Commands::Delete(args) => job::delete(args, &ctx).await,
        Commands::Sync(args) => sync::sync(args, &ctx).await,
        Commands::Import(args) => sync::import(args, &ctx).await,

        // Queries and triggers read the store without locking
        Commands::Run(args) => run::run(args, &ctx).await,
        Commands::Test(args) => run::test(args, &ctx).await,
        Commands::List => list::handle(&ctx).await,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
