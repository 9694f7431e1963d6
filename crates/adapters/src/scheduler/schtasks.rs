// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Windows Task Scheduler adapter (`schtasks.exe`)
//!
//! Every task lives in one task folder, so `\Tock\Backup` is the job
//! `Backup`. Arguments go to schtasks as an argument array, never through a
//! shell, and the `/TR` command string is a single argument.

use super::{SchedulerAdapter, SchedulerError};
use crate::env;
use crate::subprocess::{run_with_timeout, SCHEDULER_TIMEOUT};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::process::Output;
use std::time::Duration;
use tock_core::{Job, Schedule};
use tokio::process::Command;

/// Task folder used when none is configured.
pub const DEFAULT_FOLDER: &str = "Tock";

/// schtasks-based scheduler adapter
#[derive(Clone, Debug)]
pub struct SchtasksAdapter {
    program: OsString,
    folder: String,
    timeout: Duration,
}

impl Default for SchtasksAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDER, SCHEDULER_TIMEOUT)
    }
}

impl SchtasksAdapter {
    pub fn new(folder: impl Into<String>, timeout: Duration) -> Self {
        Self::with_program(env::schtasks_program(), folder, timeout)
    }

    /// Use a specific `schtasks` executable.
    pub fn with_program(
        program: impl Into<OsString>,
        folder: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let folder = folder.into();
        Self {
            program: program.into(),
            folder: folder.trim_matches('\\').to_string(),
            timeout,
        }
    }

    /// Full task path for a job name: `\Tock\<name>`.
    pub fn task_name(&self, name: &str) -> String {
        format!("\\{}\\{}", self.folder, name)
    }

    async fn schtasks(
        &self,
        args: Vec<String>,
        description: &str,
    ) -> Result<Output, SchedulerError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&args);
        run_with_timeout(cmd, self.timeout, description)
            .await
            .map_err(SchedulerError::Unavailable)
    }
}

#[async_trait]
impl SchedulerAdapter for SchtasksAdapter {
    async fn register(&self, job: &Job) -> Result<(), SchedulerError> {
        let task = self.task_name(job.name());
        self.deregister(job.name()).await?;

        let output = self
            .schtasks(create_args(&task, job), "schtasks /Create")
            .await?;
        check(&output)
    }

    async fn deregister(&self, name: &str) -> Result<(), SchedulerError> {
        let task = self.task_name(name);
        let output = self.schtasks(delete_args(&task), "schtasks /Delete").await?;
        match check(&output) {
            Err(SchedulerError::NotFound(_)) => Ok(()),
            other => other,
        }
    }

    async fn run_now(&self, name: &str) -> Result<(), SchedulerError> {
        let task = self.task_name(name);
        let output = self.schtasks(run_args(&task), "schtasks /Run").await?;
        check(&output)
    }

    async fn list_registered(&self) -> Result<BTreeSet<String>, SchedulerError> {
        let output = self.schtasks(query_args(), "schtasks /Query").await?;
        check(&output)?;
        Ok(parse_query(
            &String::from_utf8_lossy(&output.stdout),
            &self.folder,
        ))
    }
}

pub(crate) fn create_args(task: &str, job: &Job) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "/Create".into(),
        "/TN".into(),
        task.into(),
        "/TR".into(),
        job.command_line().to_command_string(),
    ];
    match job.schedule() {
        Schedule::Daily => args.extend(["/SC".into(), "DAILY".into()]),
        Schedule::Weekly { .. } => args.extend([
            "/SC".into(),
            "WEEKLY".into(),
            "/D".into(),
            job.schedule().day_codes(),
        ]),
    }
    args.extend(["/ST".into(), job.time().to_string(), "/F".into()]);
    args
}

pub(crate) fn delete_args(task: &str) -> Vec<String> {
    vec!["/Delete".into(), "/TN".into(), task.into(), "/F".into()]
}

pub(crate) fn run_args(task: &str) -> Vec<String> {
    vec!["/Run".into(), "/TN".into(), task.into()]
}

pub(crate) fn query_args() -> Vec<String> {
    vec!["/Query".into(), "/FO".into(), "CSV".into(), "/NH".into()]
}

fn check(output: &Output) -> Result<(), SchedulerError> {
    if output.status.success() {
        return Ok(());
    }
    let mut message = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if message.is_empty() {
        message = String::from_utf8_lossy(&output.stdout).trim().to_string();
    }
    if message.is_empty() {
        message = format!("schtasks exited with {}", output.status);
    }
    Err(classify_failure(message))
}

/// Map the text of a failed schtasks invocation onto an error kind.
pub(crate) fn classify_failure(message: String) -> SchedulerError {
    let lower = message.to_lowercase();
    if lower.contains("cannot find") || lower.contains("does not exist") {
        SchedulerError::NotFound(message)
    } else if lower.contains("access is denied") {
        SchedulerError::PermissionDenied(message)
    } else {
        SchedulerError::InvalidArguments(message)
    }
}

/// Job names from `/Query /FO CSV /NH` output that live directly in `folder`.
pub(crate) fn parse_query(stdout: &str, folder: &str) -> BTreeSet<String> {
    let prefix = format!("\\{}\\", folder);
    stdout
        .lines()
        .filter_map(first_csv_field)
        .filter_map(|task| {
            let rest = task.strip_prefix(prefix.as_str())?;
            (!rest.is_empty() && !rest.contains('\\')).then(|| rest.to_string())
        })
        .collect()
}

fn first_csv_field(line: &str) -> Option<&str> {
    let line = line.trim();
    match line.strip_prefix('"') {
        Some(rest) => rest.find('"').map(|end| &rest[..end]),
        None => line.split(',').next().filter(|f| !f.is_empty()),
    }
}

#[cfg(test)]
#[path = "schtasks_tests.rs"]
mod tests;
