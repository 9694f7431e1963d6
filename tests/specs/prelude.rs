//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the tock binary against an isolated
//! data directory and a fake `crontab` that keeps its table in a file.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 2000;

/// Keep scheduler calls snappy; the fake crontab answers instantly.
const TOCK_SCHEDULER_TIMEOUT_MS: &str = "2000";

/// Returns the path to a binary, checking the llvm-cov target directory first.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    assert_cmd::cargo::cargo_bin(name)
}

/// Returns a Command configured to run the tock binary
pub fn tock_cmd() -> Command {
    Command::new(binary_path("tock"))
}

/// Create a CLI builder for tock commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: vec![
                ("NO_COLOR".into(), "1".into()),
                (
                    "TOCK_SCHEDULER_TIMEOUT_MS".into(),
                    TOCK_SCHEDULER_TIMEOUT_MS.into(),
                ),
            ],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = tock_cmd();
        cmd.args(&self.args);

        // Parent settings must not leak into tests
        for var in [
            "TOCK_STATE_DIR",
            "TOCK_BACKEND",
            "TOCK_CRONTAB_BIN",
            "TOCK_LOG",
            "COLOR",
        ] {
            cmd.env_remove(var);
        }
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    fn output(self) -> Output {
        self.command().output().expect("command should run")
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.output();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.output();
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect a specific exit code
    pub fn exits_with(self, code: i32) -> RunAssert {
        let output = self.output();
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit code\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap_or_else(|e| {
            panic!("stdout is not JSON ({e}):\n{}", self.stdout());
        })
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

// =============================================================================
// Polling
// =============================================================================

/// Poll a condition until it returns true or timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);
    let poll_interval = std::time::Duration::from_millis(SPEC_POLL_INTERVAL_MS);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll_interval);
    }
    false
}

// =============================================================================
// Environment
// =============================================================================

/// A `crontab` stand-in. The table lives next to the script. A `deny` file
/// makes writes fail the way a locked-down account does: an empty file
/// refuses every write, otherwise only tables containing its text.
const FAKE_CRONTAB: &str = r#"#!/bin/sh
DIR="$(dirname "$0")"
TABLE="$DIR/table"
case "$1" in
  -l)
    if [ -f "$TABLE" ]; then cat "$TABLE"; else echo "no crontab for tester" >&2; exit 1; fi ;;
  -)
    INPUT="$(cat)"
    if [ -f "$DIR/deny" ]; then
      PATTERN="$(cat "$DIR/deny")"
      case "$INPUT" in
        *"$PATTERN"*)
          echo "You (tester) are not allowed to use this program (crontab)" >&2
          exit 1 ;;
      esac
    fi
    if [ -n "$INPUT" ]; then printf '%s\n' "$INPUT" > "$TABLE"; else : > "$TABLE"; fi ;;
esac
"#;

/// An isolated data directory plus a fake OS scheduler.
pub struct Tock {
    state_dir: tempfile::TempDir,
    scheduler_dir: tempfile::TempDir,
}

impl Tock {
    pub fn new() -> Self {
        let tock = Self {
            state_dir: tempfile::tempdir().unwrap(),
            scheduler_dir: tempfile::tempdir().unwrap(),
        };
        let script = tock.crontab_bin();
        std::fs::write(&script, FAKE_CRONTAB).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        tock
    }

    pub fn state_path(&self) -> &Path {
        self.state_dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.state_path().join("jobs.json")
    }

    fn crontab_bin(&self) -> PathBuf {
        self.scheduler_dir.path().join("crontab")
    }

    /// Run tock against this environment's store and fake crontab
    pub fn tock(&self) -> CliBuilder {
        cli()
            .env("TOCK_STATE_DIR", self.state_path())
            .env("TOCK_BACKEND", "crontab")
            .env("TOCK_CRONTAB_BIN", self.crontab_bin())
    }

    /// Current contents of the fake crontab (empty when never written)
    pub fn crontab(&self) -> String {
        std::fs::read_to_string(self.scheduler_dir.path().join("table")).unwrap_or_default()
    }

    /// Replace the fake crontab, as if edited outside tock
    pub fn set_crontab(&self, table: &str) {
        std::fs::write(self.scheduler_dir.path().join("table"), table).unwrap();
    }

    /// Make the scheduler refuse any table that registers `name`
    pub fn deny_job(&self, name: &str) {
        std::fs::write(
            self.scheduler_dir.path().join("deny"),
            format!("# tock:{name}\n"),
        )
        .unwrap();
    }

    /// Make the scheduler refuse (or accept again) every change
    pub fn deny_writes(&self, deny: bool) {
        let marker = self.scheduler_dir.path().join("deny");
        if deny {
            std::fs::write(marker, "").unwrap();
        } else {
            let _ = std::fs::remove_file(marker);
        }
    }

    /// Names registered in the fake crontab, in table order
    pub fn registered(&self) -> Vec<String> {
        self.crontab()
            .lines()
            .filter_map(|l| l.strip_prefix("# tock:"))
            .map(str::to_string)
            .collect()
    }

    /// Names in the store, in store order
    pub fn declared(&self) -> Vec<String> {
        let Ok(text) = std::fs::read_to_string(self.store_path()) else {
            return Vec::new();
        };
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        doc["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["name"].as_str().unwrap().to_string())
            .collect()
    }

    /// Write a file in a scratch directory and return its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.scheduler_dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// A path under the scratch directory, for commands to touch
    pub fn scratch(&self, name: &str) -> PathBuf {
        self.scheduler_dir.path().join(name)
    }
}

impl Default for Tock {
    fn default() -> Self {
        Self::new()
    }
}
