// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for svnq using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! svnq [global options] <command>
//! version | options | inis
//! info [TARGET] | type URL | status | log [ARGS..] | list [TARGET]
//! add PATH [OPTIONS..] | checkout URL [NAME] | update [PATHS..] | switch URL
//! copy SOURCES.. DEST | commit -m MSG [FILES..] | cleanup [PATH]
//! choose URL [PATHS..]
//! ```

pub mod global;
pub mod svn;


use crate::cli::global::GlobalOptions;
use crate::cli::svn::{
    AddArgs, CheckoutArgs, ChooseArgs, CleanupArgs, CommitArgs, CopyArgs, InfoArgs, ListArgs,
    LogArgs, SwitchArgs, TypeArgs, UpdateArgs,
};
use clap::{Parser, Subcommand};

/// Subversion command queue and output parser.
#[derive(Debug, Parser)]
#[command(
    name = "svnq",
    author,
    version,
    about = "Runs svn commands and prints their output as records",
    long_about = "svnq Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs the svn command line client against one working copy and\n\
                  turns its reports into records. `svnq -C wc choose URL a/b`\n\
                  checks out only `a/b` of URL into `wc`. See\n\
                  `svnq <command> --help` for more information about a command.",
    after_help = "INI FILES:\n\n\
                  By default, svnq loads `svnq.toml` from the current directory\n\
                  if it exists. Additional files can be specified with --ini,\n\
                  those are loaded after it. SVNQ_SECTION__KEY environment\n\
                  variables override files; --set and the other flags override\n\
                  everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version of svnq and svn.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files in use.
    Inis,

    /// Shows `svn info` as key/value pairs.
    Info(InfoArgs),

    /// Shows the node kind of a URL.
    Type(TypeArgs),

    /// Shows changed files of the working copy.
    #[command(visible_alias = "st")]
    Status,

    /// Shows the revision log with changed paths.
    Log(LogArgs),

    /// Lists entries of a directory.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Puts a file or directory under version control.
    Add(AddArgs),

    /// Checks out a repository URL.
    #[command(visible_alias = "co")]
    Checkout(CheckoutArgs),

    /// Updates the working copy.
    #[command(visible_alias = "up")]
    Update(UpdateArgs),

    /// Switches the working copy to another URL.
    #[command(visible_alias = "sw")]
    Switch(SwitchArgs),

    /// Copies files with history.
    #[command(visible_alias = "cp")]
    Copy(CopyArgs),

    /// Commits changes.
    #[command(visible_alias = "ci")]
    Commit(CommitArgs),

    /// Cleans up the working copy.
    Cleanup(CleanupArgs),

    /// Checks out only selected sub-paths of a URL.
    Choose(ChooseArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
