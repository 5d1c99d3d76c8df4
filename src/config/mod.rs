// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for svnq.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. svnq.toml (cwd, optional)
//! 3. --ini files
//! 4. SVNQ_* env vars
//! 5. CLI overrides (--set, --root, --username, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SVNQ_SVN__USERNAME=alice          → svn.username = "alice"
//! SVNQ_SVN__NON_INTERACTIVE=false   → svn.non_interactive = false
//! SVNQ_GLOBAL__LOG_LEVEL=4          → global.log_level = 4
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::svn::SvnOptions;

use loader::ConfigLoader;
use types::{GlobalConfig, SvnConfig};

/// Default configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "svnq.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Subversion client options.
    pub svn: SvnConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use svnq::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("svnq.toml")
    ///     .with_env_prefix("SVNQ")
    ///     .set("svn.root", "/tmp/wc")?
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validates cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty program name or a
    /// password without a username.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.svn.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "svn".to_string(),
                key: "program".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.svn.username.is_empty() && !self.svn.password.is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "svn".to_string(),
                key: "password".to_string(),
                message: "a password requires a username".to_string(),
            });
        }
        Ok(())
    }

    /// Client options for the configured working copy.
    ///
    /// `root_override` takes precedence over `svn.root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when no root is known.
    pub fn svn_options(
        &self,
        root_override: Option<&Path>,
    ) -> std::result::Result<SvnOptions, ConfigError> {
        let root: PathBuf = root_override
            .map(Path::to_path_buf)
            .or_else(|| self.svn.root.clone())
            .ok_or_else(|| ConfigError::MissingKey {
                section: "svn".to_string(),
                key: "root".to_string(),
            })?;

        Ok(SvnOptions::builder()
            .with_root(root)
            .with_program(self.svn.program.clone())
            .maybe_with_credentials(self.svn.credentials())
            .with_non_interactive(self.svn.non_interactive)
            .with_trust_server_cert(self.svn.trust_server_cert)
            .build())
    }

    /// Format configuration options for display.
    ///
    /// Sensitive fields are hidden with a `[hidden]` marker. Output is
    /// deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_svn_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.log_level".into(),
            self.global.log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_svn_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("svn.program".into(), self.svn.program.clone());
        options.insert(
            "svn.root".into(),
            self.svn
                .root
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("svn.username".into(), self.svn.username.clone());
        if !self.svn.password.is_empty() {
            options.insert("svn.password".into(), "[hidden]".into());
        }
        options.insert(
            "svn.non_interactive".into(),
            self.svn.non_interactive.to_string(),
        );
        options.insert(
            "svn.trust_server_cert".into(),
            self.svn.trust_server_cert.to_string(),
        );
    }
}
