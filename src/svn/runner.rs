// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Execution of one external command.
//!
//! ```text
//! ProcessRunner::run(command, cwd)
//!   CliRunner:  cwd exists? --no--> WorkingDirectoryMissing
//!               which(program) --no exe--> NotFound
//!               spawn
//!               exit != 0 or stderr text --> ExecutionFailed { redacted command, stderr }
//!               --> stdout
//! ```

use std::path::Path;

use futures_util::future::BoxFuture;
use tracing::{info, trace, warn};

use super::command::CommandLine;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{SvnError, SvnResult};

/// Runs one command in a working directory and returns its standard output.
///
/// Implementations must report a missing executable as
/// [`SvnError::NotFound`] so callers can tell it apart from tool failures.
pub trait ProcessRunner: Send + Sync {
    fn run<'a>(
        &'a self,
        command: &'a CommandLine,
        cwd: &'a Path,
    ) -> BoxFuture<'a, SvnResult<String>>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliRunner;

impl CliRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn execute(command: &CommandLine, cwd: &Path) -> SvnResult<String> {
        if !cwd.is_dir() {
            return Err(SvnError::WorkingDirectoryMissing {
                path: cwd.display().to_string(),
            });
        }

        info!(cwd = %cwd.display(), cmd = %command, "run");

        let output = ProcessBuilder::which(command.program())?
            .args(command.args())
            .cwd(cwd)
            .capture_output()
            .run()
            .await?;

        trace!(exit_code = output.exit_code(), "finished");

        if !output.stderr().is_empty() {
            warn!(cmd = %command, stderr = %output.stderr(), "svn reported an error");
        }

        if !output.success() || !output.stderr().is_empty() {
            let message = if output.stderr().is_empty() {
                format!("exited with code {}", output.exit_code())
            } else {
                output.stderr().to_string()
            };
            return Err(SvnError::ExecutionFailed {
                command: command.to_string(),
                message,
            });
        }

        Ok(output.into_stdout())
    }
}

impl ProcessRunner for CliRunner {
    fn run<'a>(
        &'a self,
        command: &'a CommandLine,
        cwd: &'a Path,
    ) -> BoxFuture<'a, SvnResult<String>> {
        Box::pin(Self::execute(command, cwd))
    }
}
