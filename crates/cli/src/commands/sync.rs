// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock sync` and `tock import`: batch operations with a per-job report

use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;
use tock_engine::{
    CancelToken, JobReport, Outcome, Reconciler, SyncAction, SyncOptions, SyncReport,
};

use crate::color;
use crate::context::Context;
use crate::exit_error::{ExitError, BATCH_FAILED};
use crate::output::{plural, print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct SyncArgs {
    /// Deregister tasks in tock's namespace that no job declares
    #[arg(long)]
    pub prune: bool,

    /// Re-register jobs that are already registered
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Job file to import (a tock store or the legacy db.json)
    pub file: PathBuf,
}

pub async fn sync(args: SyncArgs, ctx: &Context) -> Result<()> {
    let options = SyncOptions {
        prune: args.prune,
        force: args.force,
        cancel: cancel_on_ctrl_c(),
    };

    let (_lock, mut store) = ctx.lock_store()?;
    let report = Reconciler::new(&mut store, &ctx.scheduler)
        .reload(&options)
        .await?;

    print_report(&report, ctx.format)?;
    finish(&report)
}

pub async fn import(args: ImportArgs, ctx: &Context) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let drafts = tock_storage::decode_drafts(&text, &args.file)?;
    let options = SyncOptions {
        cancel: cancel_on_ctrl_c(),
        ..SyncOptions::default()
    };

    let (_lock, mut store) = ctx.lock_store()?;
    let report = Reconciler::new(&mut store, &ctx.scheduler)
        .import(drafts, &options)
        .await?;

    print_report(&report, ctx.format)?;
    finish(&report)
}

/// Ctrl-C stops the batch between jobs instead of killing the process.
fn cancel_on_ctrl_c() -> CancelToken {
    let token = CancelToken::new();
    let handle = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, skipping remaining jobs");
            handle.cancel();
        }
    });
    token
}

fn finish(report: &SyncReport) -> Result<()> {
    let failed = report.failed().count();
    if failed == 0 {
        return Ok(());
    }
    let message = format!("{} failed", plural(failed, "job"));
    Err(ExitError::new(BATCH_FAILED, message).into())
}

fn print_report(report: &SyncReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if report.entries.is_empty() {
                println!("Nothing to do");
                return Ok(());
            }
            let mut out = std::io::stdout();
            build_table(Table::new(columns()), report).render(&mut out);
            println!("{}", color::muted(&summary(report)));
            Ok(())
        }
        OutputFormat::Json => print_json(report),
    }
}

fn columns() -> Vec<Column> {
    vec![
        Column::left("NAME"),
        Column::left("ACTION"),
        Column::status("RESULT"),
        Column::muted("DETAIL").with_max(100),
    ]
}

fn build_table(mut table: Table, report: &SyncReport) -> Table {
    for entry in &report.entries {
        table.row(vec![
            entry.name.clone(),
            action_label(entry.action).to_string(),
            result_cell(&entry.outcome),
            detail_cell(entry),
        ]);
    }
    table
}

fn action_label(action: SyncAction) -> &'static str {
    match action {
        SyncAction::Register => "register",
        SyncAction::Unchanged => "unchanged",
        SyncAction::Prune => "prune",
        SyncAction::Orphan => "orphan",
        SyncAction::Import => "import",
    }
}

fn result_cell(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Ok => "ok".to_string(),
        Outcome::Failed { kind, .. } => format!("failed ({kind})"),
        Outcome::Invalid { .. } => "invalid".to_string(),
        Outcome::Skipped => "skipped".to_string(),
    }
}

fn detail_cell(entry: &JobReport) -> String {
    match &entry.outcome {
        Outcome::Failed { detail, .. } | Outcome::Invalid { detail } => detail.clone(),
        Outcome::Ok if entry.action == SyncAction::Orphan => {
            "not declared; `tock sync --prune` removes it".to_string()
        }
        Outcome::Skipped => "interrupted".to_string(),
        Outcome::Ok => String::new(),
    }
}

fn summary(report: &SyncReport) -> String {
    let mut parts = Vec::new();
    for (action, verb) in [
        (SyncAction::Register, "registered"),
        (SyncAction::Import, "imported"),
        (SyncAction::Unchanged, "unchanged"),
        (SyncAction::Prune, "pruned"),
        (SyncAction::Orphan, "orphaned"),
    ] {
        let count = report.count_ok(action);
        if count > 0 {
            parts.push(format!("{count} {verb}"));
        }
    }
    let failed = report.failed().count();
    if failed > 0 {
        parts.push(format!("{failed} failed"));
    }
    let skipped = report
        .entries
        .iter()
        .filter(|e| e.outcome == Outcome::Skipped)
        .count();
    if skipped > 0 {
        parts.push(format!("{skipped} skipped"));
    }
    let total = plural(report.entries.len(), "job");
    format!("{total}: {}", parts.join(", "))
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
