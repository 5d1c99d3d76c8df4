// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawning and waiting.
//!
//! ```text
//! run(): to_command() --spawn--> drain streams + wait --> ProcessOutput
//! ```
//!
//! There is no timeout: a hung child keeps `run()` pending until it exits.
//! Dropping the future kills the child.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Runs the process to completion and returns whatever exit code it
    /// ended with.
    ///
    /// # Errors
    ///
    /// - [`ProcessError::SpawnFailed`] if the child cannot be started; a
    ///   missing executable keeps its `NotFound` kind.
    /// - [`ProcessError::Io`] if waiting on the child fails.
    pub async fn run(self) -> Result<ProcessOutput, ProcessError> {
        let name = self.display_name();
        debug!(
            process = %name,
            cwd = ?self.cwd.as_deref().map(std::path::Path::display),
            args = self.args.len(),
            "exec"
        );

        let mut child = self
            .to_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: name.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &mut child).await?;
        trace!(process = %name, exit_code = output.exit_code(), "exited");
        Ok(output)
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }
}
