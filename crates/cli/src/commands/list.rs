// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock list`

use anyhow::Result;
use serde::Serialize;
use tock_core::{Job, Schedule};
use tock_engine::{EngineError, Reconciler};

use crate::context::Context;
use crate::output::{print_json, OutputFormat};
use crate::table::{Column, Table};

/// One declared job; `registered` is `None` when the scheduler could not be asked.
#[derive(Debug, Serialize)]
pub struct ListEntry {
    #[serde(flatten)]
    pub job: Job,
    pub registered: Option<bool>,
}

pub async fn handle(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let status = Reconciler::new(&mut store, &ctx.scheduler).status().await;

    let entries: Vec<ListEntry> = match status {
        Ok(statuses) => statuses
            .into_iter()
            .map(|s| ListEntry {
                job: s.job,
                registered: Some(s.registered),
            })
            .collect(),
        Err(EngineError::List(e)) => {
            tracing::warn!(error = %e, "listing without registration state");
            eprintln!("warning: could not query the OS scheduler: {e}");
            store
                .list()
                .map(|job| ListEntry {
                    job: job.clone(),
                    registered: None,
                })
                .collect()
        }
        Err(e) => return Err(e.into()),
    };

    match ctx.format {
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No jobs declared");
            } else {
                let mut out = std::io::stdout();
                build_table(Table::new(columns()), &entries).render(&mut out);
            }
        }
        OutputFormat::Json => print_json(&entries)?,
    }
    Ok(())
}

fn columns() -> Vec<Column> {
    vec![
        Column::left("NAME"),
        Column::left("TIME"),
        Column::left("SCHEDULE"),
        Column::status("REGISTERED"),
        Column::muted("COMMAND"),
    ]
}

fn build_table(mut table: Table, entries: &[ListEntry]) -> Table {
    for entry in entries {
        table.row(vec![
            entry.job.name().to_string(),
            entry.job.time().to_string(),
            schedule_cell(entry.job.schedule()),
            registered_cell(entry.registered).to_string(),
            entry.job.command().to_string(),
        ]);
    }
    table
}

fn schedule_cell(schedule: &Schedule) -> String {
    match schedule {
        Schedule::Daily => "daily".to_string(),
        Schedule::Weekly { .. } => schedule.day_codes(),
    }
}

fn registered_cell(registered: Option<bool>) -> &'static str {
    match registered {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
