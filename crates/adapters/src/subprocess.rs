// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default timeout for OS scheduler commands (schtasks, crontab).
pub const SCHEDULER_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for running a job's command locally.
pub const TEST_RUN_TIMEOUT: Duration = Duration::from_secs(60);

/// Run a subprocess command with a timeout.
///
/// Wraps `Command::output()` with `tokio::time::timeout`, converting
/// timeout expiration into a descriptive error message. The child process
/// is killed if the timeout elapses.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(timed_out(description, timeout)),
    }
}

/// Like [`run_with_timeout`], feeding `input` to the child's stdin.
pub async fn run_with_input(
    mut cmd: Command,
    input: &[u8],
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let run = async {
        let mut child = cmd.spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input).await?;
            // Dropping stdin closes the pipe so the child sees EOF
        }
        child.wait_with_output().await
    };

    match tokio::time::timeout(timeout, run).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(timed_out(description, timeout)),
    }
}

fn timed_out(description: &str, timeout: Duration) -> String {
    if timeout.as_secs() > 0 {
        format!("{} timed out after {}s", description, timeout.as_secs())
    } else {
        format!("{} timed out after {}ms", description, timeout.as_millis())
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
