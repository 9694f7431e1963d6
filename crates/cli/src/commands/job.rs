// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock add`, `tock edit` and `tock delete`

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tock_core::{JobDraft, Schedule, Weekday};
use tock_engine::{Applied, EngineError, Reconciler};

use crate::context::Context;
use crate::output::print_confirmation;

#[derive(Args)]
pub struct AddArgs {
    /// Job name (also the OS task name)
    pub name: String,

    /// Time of day, 24-hour HH:MM
    #[arg(long = "at", value_name = "HH:MM")]
    pub time: String,

    /// Run only on these days (e.g. mon,wed,fri); daily when omitted
    #[arg(long = "on", value_name = "DAYS", value_delimiter = ',')]
    pub days: Vec<Weekday>,

    /// Program and arguments; quote a program path that contains spaces
    #[arg(short = 'c', long, allow_hyphen_values = true)]
    pub command: String,
}

impl AddArgs {
    pub fn into_draft(self) -> JobDraft {
        let schedule = if self.days.is_empty() {
            Schedule::Daily
        } else {
            Schedule::weekly(self.days)
        };
        JobDraft::new(self.name, self.command, self.time, schedule)
    }
}

#[derive(Args)]
pub struct EditArgs {
    /// Job to change
    pub name: String,

    /// New name (the old OS task is removed)
    #[arg(long, value_name = "NEW_NAME")]
    pub rename: Option<String>,

    /// New time of day, 24-hour HH:MM
    #[arg(long = "at", value_name = "HH:MM")]
    pub time: Option<String>,

    /// Switch to a weekly schedule on these days
    #[arg(
        long = "on",
        value_name = "DAYS",
        value_delimiter = ',',
        conflicts_with = "daily"
    )]
    pub days: Option<Vec<Weekday>>,

    /// Switch to a daily schedule
    #[arg(long)]
    pub daily: bool,

    /// New program and arguments
    #[arg(short = 'c', long, allow_hyphen_values = true)]
    pub command: Option<String>,
}

impl EditArgs {
    /// Apply the given flags on top of the current declaration.
    pub fn merge(&self, current: JobDraft) -> JobDraft {
        let schedule = if self.daily {
            Schedule::Daily
        } else if let Some(days) = &self.days {
            Schedule::weekly(days.iter().copied())
        } else {
            current.schedule
        };
        JobDraft {
            name: self.rename.clone().unwrap_or(current.name),
            command: self.command.clone().unwrap_or(current.command),
            time: self.time.clone().unwrap_or(current.time),
            schedule,
        }
    }

    fn is_noop(&self) -> bool {
        self.rename.is_none()
            && self.time.is_none()
            && self.days.is_none()
            && !self.daily
            && self.command.is_none()
    }
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Job to remove
    pub name: String,
}

#[derive(Serialize)]
struct Changed<'a> {
    name: &'a str,
    applied: Applied,
}

#[derive(Serialize)]
struct Deleted<'a> {
    name: &'a str,
    deleted: bool,
}

pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let draft = args.into_draft();
    let name = draft.name.clone();

    let (_lock, mut store) = ctx.lock_store()?;
    let applied = Reconciler::new(&mut store, &ctx.scheduler)
        .add_job(draft)
        .await
        .map_err(|e| saved_but_unregistered(e, &name))?;

    let text = match applied {
        Applied::Created => format!("Added job {name}"),
        Applied::Replaced => format!("Replaced job {name}"),
    };
    let changed = Changed {
        name: &name,
        applied,
    };
    print_confirmation(ctx.format, &text, &changed)
}

pub async fn edit(args: EditArgs, ctx: &Context) -> Result<()> {
    if args.is_noop() {
        anyhow::bail!(
            "nothing to change; pass at least one of --rename, --at, --on, --daily or --command"
        );
    }

    let (_lock, mut store) = ctx.lock_store()?;
    let current = store
        .get(&args.name)
        .map(|job| job.to_draft())
        .ok_or_else(|| EngineError::UnknownJob(args.name.clone()))?;
    let draft = args.merge(current);
    let name = draft.name.clone();

    let applied = Reconciler::new(&mut store, &ctx.scheduler)
        .edit_job(&args.name, draft)
        .await
        .map_err(|e| saved_but_unregistered(e, &name))?;

    let text = if name == args.name {
        format!("Updated job {name}")
    } else {
        format!("Renamed job {} to {name}", args.name)
    };
    let changed = Changed {
        name: &name,
        applied,
    };
    print_confirmation(ctx.format, &text, &changed)
}

pub async fn delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let (_lock, mut store) = ctx.lock_store()?;
    let job = Reconciler::new(&mut store, &ctx.scheduler)
        .delete_job(&args.name)
        .await?;

    print_confirmation(
        ctx.format,
        &format!("Deleted job {}", job.name()),
        &Deleted {
            name: job.name(),
            deleted: true,
        },
    )
}

/// A registration failure after the store write leaves the job declared.
///
/// Failures naming another job (the old name of a rename) happen before the
/// write and pass through unchanged.
fn saved_but_unregistered(err: EngineError, name: &str) -> anyhow::Error {
    match &err {
        EngineError::Scheduler { name: failed, .. } if failed == name => {
            anyhow::Error::new(err).context(format!(
                "job {name:?} was saved but is not registered; run `tock sync` to retry"
            ))
        }
        _ => err.into(),
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
