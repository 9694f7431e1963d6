// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unix crontab adapter
//!
//! Each job is two lines in the user's crontab: a `# tock:<name>` marker and
//! the entry it tags. Lines without a marker belong to someone else and are
//! carried through every rewrite untouched.

use super::{SchedulerAdapter, SchedulerError};
use crate::env;
use crate::subprocess::{run_with_input, run_with_timeout, SCHEDULER_TIMEOUT};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;
use tock_core::{CommandLine, Job, Schedule};
use tokio::process::Command;

const MARKER: &str = "# tock:";

/// crontab-based scheduler adapter
#[derive(Clone, Debug)]
pub struct CrontabAdapter {
    program: OsString,
    timeout: Duration,
}

impl Default for CrontabAdapter {
    fn default() -> Self {
        Self::new(SCHEDULER_TIMEOUT)
    }
}

impl CrontabAdapter {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program(env::crontab_program(), timeout)
    }

    /// Use a specific `crontab` executable.
    pub fn with_program(program: impl Into<OsString>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    async fn read(&self) -> Result<CrontabTable, SchedulerError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-l");
        let output = run_with_timeout(cmd, self.timeout, "crontab -l")
            .await
            .map_err(SchedulerError::Unavailable)?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Ok(CrontabTable::parse(&stdout));
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.to_lowercase().contains("no crontab for") {
            return Ok(CrontabTable::default());
        }
        Err(classify_failure(stderr))
    }

    async fn write(&self, table: &CrontabTable) -> Result<(), SchedulerError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-");
        let output = run_with_input(cmd, table.render().as_bytes(), self.timeout, "crontab -")
            .await
            .map_err(SchedulerError::Unavailable)?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(classify_failure(stderr))
    }
}

#[async_trait]
impl SchedulerAdapter for CrontabAdapter {
    async fn register(&self, job: &Job) -> Result<(), SchedulerError> {
        let mut table = self.read().await?;
        table.remove(job.name());
        table.push(job);
        self.write(&table).await
    }

    async fn deregister(&self, name: &str) -> Result<(), SchedulerError> {
        let mut table = self.read().await?;
        if !table.remove(name) {
            return Ok(());
        }
        self.write(&table).await
    }

    async fn run_now(&self, name: &str) -> Result<(), SchedulerError> {
        let table = self.read().await?;
        let command = table
            .command(name)
            .ok_or_else(|| SchedulerError::NotFound(format!("no crontab entry for {name:?}")))?;

        spawn_detached(&command)?;
        Ok(())
    }

    async fn list_registered(&self) -> Result<BTreeSet<String>, SchedulerError> {
        Ok(self.read().await?.names())
    }
}

/// Start `command` under `sh -c` without waiting for it, returning its pid.
///
/// Only the spawn is awaited. A background task reaps the child when it exits.
fn spawn_detached(command: &str) -> Result<Option<u32>, SchedulerError> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| SchedulerError::Unavailable(format!("sh -c failed: {e}")))?;
    let pid = child.id();
    tokio::spawn(async move {
        if let Err(e) = child.wait().await {
            tracing::debug!(error = %e, "detached job wait failed");
        }
    });
    Ok(pid)
}

fn classify_failure(message: String) -> SchedulerError {
    let lower = message.to_lowercase();
    if lower.contains("not allowed") || lower.contains("permission denied") {
        SchedulerError::PermissionDenied(message)
    } else if lower.contains("errors in crontab file") || lower.contains("bad ") {
        SchedulerError::InvalidArguments(message)
    } else {
        SchedulerError::Unavailable(message)
    }
}

/// `MM HH * * *` or `MM HH * * 1,5`.
pub(crate) fn schedule_expr(job: &Job) -> String {
    let time = job.time();
    let dow = match job.schedule() {
        Schedule::Daily => "*".to_string(),
        Schedule::Weekly { days } => {
            let mut numbers: Vec<u8> = days.iter().map(|d| d.cron_number()).collect();
            numbers.sort_unstable();
            numbers
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(",")
        }
    };
    format!("{} {} * * {}", time.minute(), time.hour(), dow)
}

/// The command as `sh` should see it: a program containing whitespace is
/// single-quoted. `%` is not escaped here (see [`escape_percent`]).
pub(crate) fn shell_command(command: &CommandLine) -> String {
    let program = command.program();
    let mut out = if program.chars().any(char::is_whitespace) {
        format!("'{}'", program.replace('\'', r"'\''"))
    } else {
        program.to_string()
    };
    if !command.args().is_empty() {
        out.push(' ');
        out.push_str(command.args());
    }
    out
}

/// cron turns an unescaped `%` into a newline.
fn escape_percent(command: &str) -> String {
    command.replace('%', r"\%")
}

fn unescape_percent(command: &str) -> String {
    command.replace(r"\%", "%")
}

/// A user crontab split into tock-owned entries and foreign lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CrontabTable {
    lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Foreign(String),
    Entry { name: String, line: String },
}

impl CrontabTable {
    pub(crate) fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut iter = text.lines();
        while let Some(line) = iter.next() {
            match line.strip_prefix(MARKER) {
                Some(name) => match iter.next() {
                    Some(entry) => lines.push(Line::Entry {
                        name: name.to_string(),
                        line: entry.to_string(),
                    }),
                    // Dangling marker at end of file
                    None => lines.push(Line::Foreign(line.to_string())),
                },
                None => lines.push(Line::Foreign(line.to_string())),
            }
        }
        Self { lines }
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Foreign(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Line::Entry { name, line } => {
                    out.push_str(MARKER);
                    out.push_str(name);
                    out.push('\n');
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        out
    }

    pub(crate) fn names(&self) -> BTreeSet<String> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Entry { name, .. } => Some(name.clone()),
                Line::Foreign(_) => None,
            })
            .collect()
    }

    /// Drop every entry tagged `name`; true if any was present.
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        let before = self.lines.len();
        self.lines
            .retain(|line| !matches!(line, Line::Entry { name: n, .. } if n == name));
        self.lines.len() != before
    }

    pub(crate) fn push(&mut self, job: &Job) {
        let line = format!(
            "{} {}",
            schedule_expr(job),
            escape_percent(&shell_command(job.command_line()))
        );
        self.lines.push(Line::Entry {
            name: job.name().to_string(),
            line,
        });
    }

    /// Shell command of the entry tagged `name`, ready for `sh -c`.
    pub(crate) fn command(&self, name: &str) -> Option<String> {
        self.lines.iter().find_map(|line| match line {
            Line::Entry { name: n, line } if n == name => {
                command_field(line).map(unescape_percent)
            }
            _ => None,
        })
    }
}

/// Everything after the five schedule fields.
fn command_field(line: &str) -> Option<&str> {
    let mut rest = line.trim_start();
    for _ in 0..5 {
        let (_, tail) = rest.split_once(char::is_whitespace)?;
        rest = tail.trim_start();
    }
    (!rest.is_empty()).then_some(rest)
}

#[cfg(test)]
#[path = "crontab_tests.rs"]
mod tests;
