// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the svn subcommands.

use clap::Args;

use crate::svn::Depth;

#[derive(Debug, Clone, Args)]
pub struct InfoArgs {
    /// Path or URL; the working copy root when omitted.
    pub target: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct TypeArgs {
    /// URL to inspect.
    pub url: String,
}

#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Extra arguments for `svn log`, e.g. `-l 10`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Path or URL; the working copy root when omitted.
    pub target: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Path relative to the working copy root.
    pub path: String,

    /// Extra arguments for `svn add`, e.g. `--force`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    /// Repository URL.
    pub url: String,

    /// Target directory below the root; checks out into the root itself
    /// when omitted.
    pub name: Option<String>,

    /// Checkout depth (empty, files, immediates, infinity).
    #[arg(long, value_name = "DEPTH")]
    pub depth: Option<Depth>,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Paths relative to the root; the whole working copy when omitted.
    pub paths: Vec<String>,

    /// Update depth (empty, files, immediates, infinity).
    #[arg(long, value_name = "DEPTH")]
    pub depth: Option<Depth>,

    /// Conflict resolution policy, `postpone` by default.
    #[arg(long, value_name = "ACTION")]
    pub accept: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct SwitchArgs {
    /// URL to switch the working copy to.
    pub url: String,
}

#[derive(Debug, Clone, Args)]
pub struct CopyArgs {
    /// Sources followed by the destination.
    #[arg(required = true, num_args = 2.., value_name = "SOURCES.. DEST")]
    pub paths: Vec<String>,
}

impl CopyArgs {
    /// Splits the positional list into sources and destination.
    #[must_use]
    pub fn split(&self) -> (&[String], &str) {
        match self.paths.split_last() {
            Some((dest, sources)) => (sources, dest.as_str()),
            None => (&[], ""),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short = 'm', long = "message")]
    pub message: String,

    /// Files relative to the root; everything changed when omitted.
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CleanupArgs {
    /// Path relative to the root; the root itself when omitted.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ChooseArgs {
    /// Repository URL checked out into the root.
    pub url: String,

    /// Sub-paths to materialize, e.g. `trunk/docs`.
    pub paths: Vec<String>,
}
