// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job validation.
//!
//! `validate` is the only way to turn a [`JobDraft`] into a [`Job`]. It is
//! pure: no filesystem, no scheduler.

use crate::command::CommandLine;
use crate::job::{Job, JobDraft};
use crate::schedule::{JobTime, Schedule};
use thiserror::Error;

/// Characters OS schedulers refuse in task names (path separators included).
pub const RESERVED_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Longest accepted job name. Leaves room for the task folder prefix within
/// the Windows Task Scheduler's 238-character limit.
pub const MAX_NAME_LEN: usize = 200;

/// Caller-fixable problems with a job draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("job name must not be empty")]
    EmptyName,
    #[error("invalid job name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
    #[error("a job named {0:?} already exists")]
    DuplicateName(String),
    #[error("weekly schedule needs at least one weekday")]
    NoWeekdays,
    #[error("invalid time {0:?}: expected HH:MM between 00:00 and 23:59")]
    InvalidTime(String),
    #[error("command must not be empty")]
    EmptyCommand,
    #[error("command has an unterminated quote")]
    UnterminatedQuote,
}

/// Validate a draft, short-circuiting on the first failure.
///
/// Order: name, schedule, time, command.
pub fn validate(draft: JobDraft) -> Result<Job, ValidationError> {
    validate_name(&draft.name)?;
    if let Schedule::Weekly { days } = &draft.schedule {
        if days.is_empty() {
            return Err(ValidationError::NoWeekdays);
        }
    }
    let time = JobTime::parse(&draft.time)?;
    let command_line = CommandLine::parse(&draft.command)?;

    Ok(Job::from_parts(
        draft.name,
        draft.command,
        command_line,
        time,
        draft.schedule,
    ))
}

pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.trim() != name {
        return Err(invalid("leading or trailing whitespace"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(invalid(&format!("longer than {MAX_NAME_LEN} characters")));
    }
    if let Some(c) = name.chars().find(|c| RESERVED_NAME_CHARS.contains(c)) {
        return Err(invalid(&format!("contains reserved character '{c}'")));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("contains control characters"));
    }
    // `\Tock\.` and `\Tock\..` name the task folder, not a task in it
    if name.chars().all(|c| c == '.') {
        return Err(invalid("consists only of dots"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
