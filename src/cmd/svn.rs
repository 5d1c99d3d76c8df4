// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Handlers for the svn subcommands.
//!
//! ```text
//! Config --> open_client --> Svn::open --> run_svn_command --> emit (text | JSON)
//! ```

use std::path::Path;

use anyhow::Context;
use tracing::info;

use super::output::{
    emit, format_actions, format_info, format_list, format_log, format_status,
};
use crate::cli::Command;
use crate::config::Config;
use crate::error::Result;
use crate::svn::Svn;

/// Builds a client for the configured working copy.
///
/// # Errors
///
/// Returns an error if no root is configured, the root cannot be created,
/// or svn cannot be started.
pub async fn open_client(config: &Config, root: Option<&Path>) -> Result<Svn> {
    let options = config.svn_options(root)?;
    let root = options.root().clone();
    Svn::open(options)
        .await
        .with_context(|| format!("failed to open working copy '{}'", root.display()))
}

/// Runs one svn subcommand and prints its result.
///
/// # Errors
///
/// Returns the svn error of the command, or an error for commands that are
/// not svn subcommands.
pub async fn run_svn_command(command: &Command, svn: &Svn, json: bool) -> Result<()> {
    match command {
        Command::Info(args) => {
            let info = svn.info(args.target.as_deref()).await?;
            emit(&info, json, format_info)
        }
        Command::Type(args) => {
            let kind = svn.node_kind(&args.url).await?;
            emit(&kind, json, |kind| vec![kind.clone()])
        }
        Command::Status => {
            let entries = svn.status().await?;
            emit(&entries, json, |entries| format_status(entries))
        }
        Command::Log(args) => {
            let entries = svn.log(&args.args).await?;
            emit(&entries, json, |entries| format_log(entries))
        }
        Command::List(args) => {
            let entries = svn.list(args.target.as_deref()).await?;
            emit(&entries, json, |entries| format_list(entries))
        }
        Command::Add(args) => {
            let actions = svn.add(&args.path, &args.options).await?;
            emit(&actions, json, |actions| format_actions(actions))
        }
        Command::Checkout(args) => {
            let actions = svn
                .checkout(&args.url, args.name.as_deref(), args.depth)
                .await?;
            emit(&actions, json, |actions| format_actions(actions))
        }
        Command::Update(args) => {
            let actions = svn
                .update(&args.paths, args.depth, args.accept.as_deref())
                .await?;
            emit(&actions, json, |actions| format_actions(actions))
        }
        Command::Switch(args) => {
            let actions = svn.switch(&args.url).await?;
            emit(&actions, json, |actions| format_actions(actions))
        }
        Command::Copy(args) => {
            let (sources, dest) = args.split();
            let actions = svn.copy(sources, dest, &[]).await?;
            emit(&actions, json, |actions| format_actions(actions))
        }
        Command::Commit(args) => {
            let text = svn.commit(&args.files, &args.message).await?;
            emit(&text, json, |text| text.lines().map(str::to_string).collect())
        }
        Command::Cleanup(args) => {
            svn.cleanup(args.path.as_deref()).await?;
            info!(root = %svn.root().display(), "cleanup finished");
            Ok(())
        }
        Command::Choose(args) => {
            svn.choose(&args.url, args.paths.as_slice()).settled().await?;
            info!(root = %svn.root().display(), "sparse checkout finished");
            Ok(())
        }
        Command::Version | Command::Options | Command::Inis => {
            anyhow::bail!("not an svn subcommand")
        }
    }
}
