// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!   Process ExecutableNotFound, SpawnFailed, Io
//!      |  From
//!      v
//!   Svn     NotFound, ExecutionFailed, WorkingDirectoryMissing,
//!           InvalidPath, Io
//!   Config  ParseError, MissingKey, InvalidValue
//!
//!   anyhow::Result at the command layer
//! ```
//!
//! [`SvnError`] is `Clone` because step outcomes flow through the command
//! queue by value and a settled [`Deferred`](crate::queue::Deferred) hands a
//! copy to every listener.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type for a single svn invocation.
pub type SvnResult<T> = std::result::Result<T, SvnError>;

// --- Svn Errors ---

/// Errors produced by one invocation of the external svn client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SvnError {
    /// The svn executable could not be located. Fatal for every command.
    #[error("svn command not found: '{program}'")]
    NotFound { program: String },

    /// The tool exited with a failure status or wrote to its error stream.
    ///
    /// `command` is the redacted command line, `message` the tool's own
    /// diagnostic text.
    #[error("svn command failed: {command} - {message}")]
    ExecutionFailed { command: String, message: String },

    /// The working directory of the invocation does not exist.
    #[error("working directory '{path}' does not exist")]
    WorkingDirectoryMissing { path: String },

    /// A path argument cannot be used for the requested operation.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Local filesystem error around an invocation.
    #[error("io error: {message}")]
    Io { message: String },
}

impl SvnError {
    /// Returns true for the startup failure (executable missing).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the tool's diagnostic text for execution failures.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::ExecutionFailed { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SvnError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<ProcessError> for SvnError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::ExecutableNotFound { name } => Self::NotFound { program: name },
            ProcessError::SpawnFailed { command, source }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::NotFound { program: command }
            }
            other => Self::Io {
                message: other.to_string(),
            },
        }
    }
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child or reading its streams failed.
    #[error("i/o error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
