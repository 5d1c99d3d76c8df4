// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! [global]  log_level, file_log_level, log_file
//! [svn]     program, root, username, password, non_interactive, trust_server_cert
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::svn::{Credentials, MASK};

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Subversion client options.
///
/// `Debug` masks the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SvnConfig {
    /// Executable name or path.
    pub program: String,
    /// Working copy root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Pass `--non-interactive` to every command.
    pub non_interactive: bool,
    /// Pass `--trust-server-cert` to every command.
    pub trust_server_cert: bool,
}

impl Default for SvnConfig {
    fn default() -> Self {
        Self {
            program: "svn".to_string(),
            root: None,
            username: String::new(),
            password: String::new(),
            non_interactive: true,
            trust_server_cert: true,
        }
    }
}

impl fmt::Debug for SvnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { MASK };
        f.debug_struct("SvnConfig")
            .field("program", &self.program)
            .field("root", &self.root)
            .field("username", &self.username)
            .field("password", &password)
            .field("non_interactive", &self.non_interactive)
            .field("trust_server_cert", &self.trust_server_cert)
            .finish()
    }
}

impl SvnConfig {
    /// Credentials, only when both username and password are set.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        (!self.username.is_empty() && !self.password.is_empty())
            .then(|| Credentials::new(&self.username, &self.password))
    }
}
