// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Child process description.
//!
//! ```text
//! ProcessBuilder::which("svn")        PATH lookup, cached per program name
//!     .args([..]) .cwd(dir)
//!     .capture_output()               stdout/stderr: KEEP_IN_STRING | FORWARD_TO_LOG
//!     .run().await  -->  ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! The exit code is reported, never judged: callers decide what failure
//! means for their tool.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, PoisonError, RwLock};

use bitflags::bitflags;

use crate::error::ProcessError;

/// Program name -> resolved path, filled by [`ProcessBuilder::find`].
static RESOLVED: LazyLock<RwLock<HashMap<String, PathBuf>>> = LazyLock::new(RwLock::default);

bitflags! {
    /// What happens to one output stream.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamFlags: u8 {
        /// Every line becomes a TRACE event.
        const FORWARD_TO_LOG = 1;
        /// Lines are collected into [`ProcessOutput`].
        const KEEP_IN_STRING = 1 << 1;
    }
}

impl Default for StreamFlags {
    fn default() -> Self {
        Self::FORWARD_TO_LOG
    }
}

impl StreamFlags {
    const CAPTURE: Self = Self::KEEP_IN_STRING.union(Self::FORWARD_TO_LOG);
}

/// Exit code and captured text of a finished child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    pub(super) const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// `-1` when the child was killed by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured lines joined with `\n`; empty unless `KEEP_IN_STRING`.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub fn into_stdout(self) -> String {
        self.stdout
    }
}

/// One child process to run.
///
/// Argument values never reach the logs from here; only the display name
/// does. [`CommandLine`](crate::svn::CommandLine) logs the redacted form.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    pub(super) program: PathBuf,
    pub(super) args: Vec<OsString>,
    pub(super) cwd: Option<PathBuf>,
    pub(super) stdout: StreamFlags,
    pub(super) stderr: StreamFlags,
    name: Option<String>,
}

impl ProcessBuilder {
    /// A bare program name is looked up in `PATH` at spawn time.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            stdout: StreamFlags::default(),
            stderr: StreamFlags::default(),
            name: None,
        }
    }

    /// Resolves `program` in `PATH` first and names the builder after it.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::ExecutableNotFound`] when the lookup fails.
    pub fn which(program: &str) -> Result<Self, ProcessError> {
        let path = Self::find(program).ok_or_else(|| ProcessError::ExecutableNotFound {
            name: program.to_string(),
        })?;
        Ok(Self::new(path).name(program))
    }

    /// Full path of `program`; successful lookups are cached.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        let cached = RESOLVED
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(program)
            .cloned();
        if cached.is_some() {
            return cached;
        }

        let path = which::which(program).ok()?;
        RESOLVED
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(program.to_string(), path.clone());
        Some(path)
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Keeps stdout in the output, still tracing every line.
    #[must_use]
    pub(super) const fn capture_stdout(mut self) -> Self {
        self.stdout = StreamFlags::CAPTURE;
        self
    }

    #[must_use]
    pub(super) const fn capture_stderr(mut self) -> Self {
        self.stderr = StreamFlags::CAPTURE;
        self
    }

    /// Keeps both streams in the output.
    #[must_use]
    pub const fn capture_output(self) -> Self {
        self.capture_stdout().capture_stderr()
    }

    /// Name used in log events and errors instead of the program path.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    /// The explicit name, else the program's file stem.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.program
            .file_stem()
            .map_or_else(|| "process".to_string(), |stem| stem.to_string_lossy().into_owned())
    }
}
