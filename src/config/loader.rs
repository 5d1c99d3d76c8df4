// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!   .with_env_prefix("SVNQ")
//!   .set()
//!        |
//!        v
//!    build() --> files --> Environment(PREFIX_) --> set overrides --> Config
//! ```
//!
//! Environment variables are mapped as `PREFIX_SECTION__KEY`: a double
//! underscore separates the section, so `SVNQ_SVN__NON_INTERACTIVE` reaches
//! `svn.non_interactive`.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat, Map};

use super::Config;
use crate::error::{ConfigError, Result};

/// How a TOML source entered the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Must exist.
    File,
    /// Skipped when absent.
    Optional,
    /// Inline text.
    Inline,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Optional => "optional",
            Self::Inline => "string",
        })
    }
}

/// Layers TOML sources, `PREFIX_*` variables and explicit overrides.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    env_vars: Option<Map<String, String>>,
    overrides: Vec<(String, config::Value)>,
    sources: Vec<(SourceKind, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            env_vars: None,
            overrides: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when [`build`](Self::build) runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), SourceKind::File)
    }

    /// Adds a TOML file that is skipped when it does not exist.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), SourceKind::Optional)
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources
            .push((SourceKind::Inline, PathBuf::from("<string>")));
        self
    }

    fn add_file(mut self, path: &Path, kind: SourceKind) -> Self {
        let required = kind == SourceKind::File;
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required || path.exists() {
            self.sources.push((kind, path.to_path_buf()));
        }
        self
    }

    /// Reads `PREFIX_SECTION__KEY` variables from the process environment.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Uses `vars` instead of the process environment for the prefix lookup.
    #[must_use]
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sets a configuration override.
    ///
    /// Overrides win over files and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not of the form `section.key`.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        if key.split('.').filter(|part| !part.is_empty()).count() != 2 {
            return Err(ConfigError::InvalidValue {
                section: key.split('.').next().unwrap_or_default().to_string(),
                key: key.to_string(),
                message: "expected 'section.key'".to_string(),
            }
            .into());
        }
        self.overrides.push((key.to_string(), value.into()));
        Ok(self)
    }

    /// Applies `KEY=VALUE` strings as overrides.
    ///
    /// # Errors
    ///
    /// Returns an error for entries without `=` or with an invalid key.
    pub fn set_all<I, S>(self, assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        assignments.into_iter().try_fold(self, |loader, assignment| {
            let assignment = assignment.as_ref();
            let (key, value) = assignment
                .split_once('=')
                .with_context(|| format!("override '{assignment}' is not KEY=VALUE"))?;
            loader.set(key.trim(), value.trim())
        })
    }

    /// `PREFIX_SECTION__KEY` source, or `None` without a prefix.
    fn environment(&self) -> Option<Environment> {
        let prefix = self.env_prefix.as_deref()?;
        Some(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(self.env_vars.clone()),
        )
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - An environment variable names an unknown section or key.
    /// - The merged configuration cannot be deserialized into the `Config` struct.
    /// - The result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut builder = match self.environment() {
            Some(environment) => self.builder.add_source(environment),
            None => self.builder,
        };
        for (key, value) in self.overrides {
            builder = builder
                .set_override(&key, value)
                .with_context(|| format!("invalid override for '{key}'"))?;
        }

        let cfg = builder.build().map_err(|e| ConfigError::ParseError {
            path: self
                .sources
                .iter()
                .map(|(_, path)| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            message: e.to_string(),
        })?;
        let config: Config = cfg
            .try_deserialize()
            .context("configuration does not match the expected layout")?;
        config.validate()?;
        Ok(config)
    }

    /// Sources in load order; absent optional files are left out.
    #[must_use]
    pub fn loaded_files(&self) -> &[(SourceKind, PathBuf)] {
        &self.sources
    }

    /// `N. [kind] path` lines for the `inis` command.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .zip(1..)
            .map(|((kind, path), n)| format!("{n}. [{kind}] {}", path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
