// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running a job's command locally, outside the OS scheduler.

use crate::scheduler::SchedulerError;
use std::io::ErrorKind;
use std::time::Duration;
use tock_core::CommandLine;
use tokio::process::Command;

/// Captured result of a local test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRunOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl TestRunOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Execute the program directly (no shell) and wait for it to finish.
///
/// Arguments are split on whitespace with double-quoted segments kept whole.
/// A program that cannot be found is [`SchedulerError::NotFound`]; any other
/// spawn failure or an elapsed timeout is [`SchedulerError::Unavailable`].
pub async fn test_run(
    command: &CommandLine,
    timeout: Duration,
) -> Result<TestRunOutput, SchedulerError> {
    let mut cmd = Command::new(command.program());
    cmd.args(command.arg_list()).kill_on_drop(true);

    let program = command.program();
    tracing::info!(program, "test run");
    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            let message = format!("{program}: {e}");
            return Err(match e.kind() {
                ErrorKind::NotFound => SchedulerError::NotFound(message),
                ErrorKind::PermissionDenied => SchedulerError::PermissionDenied(message),
                _ => SchedulerError::Unavailable(message),
            });
        }
        Err(_elapsed) => {
            let message = format!("{program} timed out after {}s", timeout.as_secs());
            return Err(SchedulerError::Unavailable(message));
        }
    };

    Ok(TestRunOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
