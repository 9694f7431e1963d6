// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declared jobs and the drafts they are validated from.

use crate::command::CommandLine;
use crate::schedule::{JobTime, Schedule, Weekday};
use crate::validate::{validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Unvalidated job as submitted by a caller.
///
/// Also the on-disk record shape; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobDraft {
    pub name: String,
    pub command: String,
    /// Time of day as typed (`HH:MM`)
    pub time: String,
    pub schedule: Schedule,
}

impl JobDraft {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        time: impl Into<String>,
        schedule: Schedule,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            time: time.into(),
            schedule,
        }
    }

    pub fn daily(
        name: impl Into<String>,
        command: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self::new(name, command, time, Schedule::Daily)
    }

    pub fn weekly(
        name: impl Into<String>,
        command: impl Into<String>,
        time: impl Into<String>,
        days: impl IntoIterator<Item = Weekday>,
    ) -> Self {
        Self::new(name, command, time, Schedule::weekly(days))
    }
}

/// A validated, named scheduled unit.
///
/// Fields are private so every `Job` in existence has passed [`validate`];
/// deserialization goes through the validator as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JobDraft")]
pub struct Job {
    name: String,
    command: String,
    time: JobTime,
    schedule: Schedule,
    #[serde(skip)]
    command_line: CommandLine,
}

impl Job {
    pub(crate) fn from_parts(
        name: String,
        command: String,
        command_line: CommandLine,
        time: JobTime,
        schedule: Schedule,
    ) -> Self {
        Self {
            name,
            command,
            time,
            schedule,
            command_line,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The command exactly as declared.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The command split into program and arguments.
    pub fn command_line(&self) -> &CommandLine {
        &self.command_line
    }

    pub fn time(&self) -> JobTime {
        self.time
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Back to an editable draft.
    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            name: self.name.clone(),
            command: self.command.clone(),
            time: self.time.to_string(),
            schedule: self.schedule.clone(),
        }
    }
}

impl TryFrom<JobDraft> for Job {
    type Error = ValidationError;

    fn try_from(draft: JobDraft) -> Result<Self, Self::Error> {
        validate(draft)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
