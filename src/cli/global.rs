// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE        ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --root DIR        ← svn.root override
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: CLI flags > --set > SVNQ_* > --ini > svnq.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Disables loading `svnq.toml` from the current directory, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(
        long = "file-log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Working copy root.
    #[arg(short = 'C', long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Username passed to svn.
    #[arg(short = 'u', long = "username", value_name = "NAME")]
    pub username: Option<String>,

    /// Password passed to svn. Never logged.
    #[arg(
        short = 'p',
        long = "password",
        value_name = "PASSWORD",
        env = "SVNQ_SVN__PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Sets an option, such as 'svn.program=/opt/svn/bin/svn'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Prints records as JSON.
    #[arg(long)]
    pub json: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `section.key=value` overrides.
    ///
    /// `--root` is not included; it is applied when the client is built.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global.log_level={level}"));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global.file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global.log_file={}", path.display()));
        }

        if let Some(ref username) = self.username {
            overrides.push(format!("svn.username={username}"));
        }

        if let Some(ref password) = self.password {
            overrides.push(format!("svn.password={password}"));
        }

        overrides
    }
}
