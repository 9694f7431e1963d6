// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Splitting a job's command into program and arguments.
//!
//! Users type commands the way they would in a shell prompt, often with
//! unquoted Windows paths such as `C:\Program Files\App\app.exe --flag`.
//! OS schedulers need the program as one quoted unit, so the split decides
//! where the program ends:
//!
//! 1. A leading `"` quotes the program up to the matching quote.
//! 2. A first token that looks like a Windows path (contains `\`) may span
//!    spaces; the shortest whitespace-bounded prefix ending in a known
//!    executable extension is the program.
//! 3. Otherwise the first whitespace-delimited token is the program.

use crate::validate::ValidationError;

/// File extensions that terminate an unquoted program path.
pub const EXECUTABLE_EXTENSIONS: &[&str] = &[".exe", ".com", ".bat", ".cmd", ".ps1", ".sh"];

/// A command split into its program and the remaining argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: String,
}

impl CommandLine {
    pub fn parse(command: &str) -> Result<Self, ValidationError> {
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCommand);
        }

        if let Some(rest) = trimmed.strip_prefix('"') {
            let end = rest.find('"').ok_or(ValidationError::UnterminatedQuote)?;
            let program = rest[..end].trim();
            if program.is_empty() {
                return Err(ValidationError::EmptyCommand);
            }
            return Ok(Self {
                program: program.to_string(),
                args: rest[end + 1..].trim().to_string(),
            });
        }

        let ends = token_ends(trimmed);
        let first = ends.first().copied().unwrap_or(trimmed.len());
        let first_token = &trimmed[..first];

        let end = if first_token.contains('\\') {
            ends.iter()
                .copied()
                .find(|&end| has_executable_extension(&trimmed[..end]))
                .unwrap_or(first)
        } else {
            first
        };

        Ok(Self {
            program: trimmed[..end].to_string(),
            args: trimmed[end..].trim().to_string(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Argument text exactly as the user wrote it (trimmed).
    pub fn args(&self) -> &str {
        &self.args
    }

    /// Render as a single command string with the program quoted when it
    /// contains whitespace: `"C:\Program Files\App\app.exe" --flag`.
    pub fn to_command_string(&self) -> String {
        let mut out = if self.program.chars().any(char::is_whitespace) {
            format!("\"{}\"", self.program)
        } else {
            self.program.clone()
        };
        if !self.args.is_empty() {
            out.push(' ');
            out.push_str(&self.args);
        }
        out
    }

    /// Arguments split on whitespace, with double-quoted segments kept whole.
    pub fn arg_list(&self) -> Vec<String> {
        let mut args = Vec::new();
        let mut current = String::new();
        let mut in_token = false;
        let mut quoted = false;
        for ch in self.args.chars() {
            match ch {
                '"' => {
                    quoted = !quoted;
                    in_token = true;
                }
                c if c.is_whitespace() && !quoted => {
                    if in_token {
                        args.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            }
        }
        if in_token {
            args.push(current);
        }
        args
    }
}

/// Byte offsets where each whitespace-delimited token ends.
fn token_ends(s: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut in_token = false;
    for (idx, ch) in s.char_indices() {
        if ch.is_whitespace() {
            if in_token {
                ends.push(idx);
            }
            in_token = false;
        } else {
            in_token = true;
        }
    }
    if in_token {
        ends.push(s.len());
    }
    ends
}

fn has_executable_extension(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    EXECUTABLE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
