// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subversion client.
//!
//! ```text
//! Svn::open(options)            mkdir root, svn --version --quiet
//!   |
//!   +-- add / checkout / update / switch / copy --> parse_actions
//!   +-- info / node_kind                        --> parse_info
//!   +-- status                                  --> parse_status
//!   +-- list                                    --> parse_list
//!   +-- log       (log -v, then info)           --> parse_log
//!   +-- commit / cleanup / version              --> text
//!   +-- queue / choose                          --> CommandQueue --> Deferred
//!
//! every call: CommandLine::svn (flags, credentials) --> ProcessRunner
//! ```
//!
//! The client holds no per-invocation state, so clones can drive
//! independent queues concurrently.

mod choose;
mod command;
mod runner;

#[cfg(test)]
mod tests;

pub use choose::{ChooseKind, ChooseStep, plan_choose};
pub(crate) use command::MASK;
pub use command::{CommandLine, Credentials, Depth, SvnOptions};
pub use runner::{CliRunner, ProcessRunner};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::process::builder::ProcessBuilder;
use crate::error::{SvnError, SvnResult};
use crate::parse::{
    Action, InfoRecord, ListEntry, LogEntry, StatusEntry, parse_actions, parse_info, parse_list,
    parse_log, parse_status,
};
use crate::queue::{CommandQueue, Deferred, StepOutcome};

/// Accept policy used by update and switch unless the caller picks one.
pub const DEFAULT_ACCEPT: &str = "postpone";

/// Value carried between queue steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SvnOutput {
    #[default]
    Empty,
    Text(String),
    Actions(Vec<Action>),
    Info(InfoRecord),
    Status(Vec<StatusEntry>),
    Log(Vec<LogEntry>),
    Listing(Vec<ListEntry>),
}

/// Outcome of a queue or workflow run.
pub type SvnDeferred = Deferred<StepOutcome<SvnOutput>>;

/// Handle to one working copy.
#[derive(Clone)]
pub struct Svn {
    options: Arc<SvnOptions>,
    runner: Arc<dyn ProcessRunner>,
}

impl fmt::Debug for Svn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Svn")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Svn {
    /// Opens a client on the real `svn` executable.
    ///
    /// Looks the executable up first, so a missing tool leaves the disk
    /// untouched. Creates the root directory if it is missing, then checks
    /// that the tool can be started.
    ///
    /// # Errors
    ///
    /// Returns [`SvnError::NotFound`] if the executable is missing, or
    /// [`SvnError::Io`] if the root cannot be created.
    pub async fn open(options: SvnOptions) -> SvnResult<Self> {
        if ProcessBuilder::find(options.program()).is_none() {
            return Err(SvnError::NotFound {
                program: options.program().to_string(),
            });
        }

        if !options.root().is_dir() {
            debug!(root = %options.root().display(), "creating working copy root");
            tokio::fs::create_dir_all(options.root()).await?;
        }

        let svn = Self::with_runner(options, Arc::new(CliRunner::new()));
        let version = svn.version().await?;
        info!(version = %version, root = %svn.root().display(), "svn ready");
        Ok(svn)
    }

    /// Creates a client that runs commands through `runner`.
    #[must_use]
    pub fn with_runner(options: SvnOptions, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            options: Arc::new(options),
            runner,
        }
    }

    #[must_use]
    pub fn options(&self) -> &SvnOptions {
        &self.options
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.options.root()
    }

    /// Builds and runs one svn command.
    async fn exec<I, S>(&self, args: I, cwd: &Path) -> SvnResult<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let command = CommandLine::svn(args, &self.options);
        self.runner.run(&command, cwd).await
    }

    /// `target` resolved against the root, as a command argument.
    fn resolve(&self, target: &str) -> String {
        self.root().join(target).display().to_string()
    }

    /// `svn --version --quiet`.
    ///
    /// # Errors
    ///
    /// Fails if the tool cannot be started or reports an error.
    pub async fn version(&self) -> SvnResult<String> {
        let text = self.exec(["--version", "--quiet"], self.root()).await?;
        Ok(text.trim().to_string())
    }

    /// `svn add [OPTIONS..] ROOT/PATH`.
    ///
    /// # Errors
    ///
    /// Fails if the tool reports an error.
    pub async fn add(&self, path: &str, options: &[String]) -> SvnResult<Vec<Action>> {
        let mut args = vec!["add".to_string()];
        args.extend(options.iter().cloned());
        args.push(self.resolve(path));

        let text = self.exec(args, self.root()).await?;
        Ok(parse_actions(&text))
    }

    /// `svn checkout URL [NAME] [--depth=D]`.
    ///
    /// Without a name the root itself becomes the working copy: the command
    /// runs in the root's parent with the root's directory name as target.
    ///
    /// # Errors
    ///
    /// Returns [`SvnError::InvalidPath`] if the root has no directory name,
    /// or the tool's error.
    pub async fn checkout(
        &self,
        url: &str,
        name: Option<&str>,
        depth: Option<Depth>,
    ) -> SvnResult<Vec<Action>> {
        let mut args = vec!["checkout".to_string(), url.to_string()];

        let cwd = if let Some(name) = name {
            args.push(name.to_string());
            self.root().to_path_buf()
        } else {
            let (parent, target) = self.split_root()?;
            args.push(target);
            parent
        };

        if let Some(depth) = depth {
            args.push(depth.to_arg());
        }

        let text = self.exec(args, &cwd).await?;
        Ok(parse_actions(&text))
    }

    fn split_root(&self) -> SvnResult<(PathBuf, String)> {
        let root = self.root();
        let name = root.file_name().ok_or_else(|| SvnError::InvalidPath {
            path: root.display().to_string(),
            reason: "working copy root has no directory name".to_string(),
        })?;
        let parent = match root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((parent, name.to_string_lossy().into_owned()))
    }

    /// `svn update [PATHS..] [--depth=D] --accept A`, run in the root.
    ///
    /// `accept` defaults to [`DEFAULT_ACCEPT`].
    ///
    /// # Errors
    ///
    /// Fails if the tool reports an error.
    pub async fn update(
        &self,
        paths: &[String],
        depth: Option<Depth>,
        accept: Option<&str>,
    ) -> SvnResult<Vec<Action>> {
        let mut args = vec!["update".to_string()];
        args.extend(paths.iter().cloned());
        if let Some(depth) = depth {
            args.push(depth.to_arg());
        }
        args.push("--accept".to_string());
        args.push(accept.unwrap_or(DEFAULT_ACCEPT).to_string());

        let text = self.exec(args, self.root()).await?;
        Ok(parse_actions(&text))
    }

    /// `svn switch URL ROOT --accept postpone`.
    ///
    /// # Errors
    ///
    /// Fails if the tool reports an error.
    pub async fn switch(&self, url: &str) -> SvnResult<Vec<Action>> {
        let root = self.root().display().to_string();
        let args = ["switch", url, root.as_str(), "--accept", DEFAULT_ACCEPT];
        let text = self.exec(args, self.root()).await?;
        Ok(parse_actions(&text))
    }

    /// `svn copy [OPTIONS..] SOURCES.. DEST`.
    ///
    /// When `dest` is not an existing directory, its parent is created
    /// first so the tool has somewhere to put the copy.
    ///
    /// # Errors
    ///
    /// Fails if the parent cannot be created or the tool reports an error.
    pub async fn copy(
        &self,
        sources: &[String],
        dest: &str,
        options: &[String],
    ) -> SvnResult<Vec<Action>> {
        let dest_path = self.root().join(dest);
        if !dest_path.is_dir()
            && let Some(parent) = dest_path.parent()
            && !parent.as_os_str().is_empty()
        {
            debug!(dir = %parent.display(), "creating copy destination parent");
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut args = vec!["copy".to_string()];
        args.extend(options.iter().cloned());
        args.extend(sources.iter().cloned());
        args.push(dest.to_string());

        let text = self.exec(args, self.root()).await?;
        Ok(parse_actions(&text))
    }

    /// `svn list [TARGET]`.
    ///
    /// # Errors
    ///
    /// Fails if the tool reports an error.
    pub async fn list(&self, target: Option<&str>) -> SvnResult<Vec<ListEntry>> {
        let mut args = vec!["list".to_string()];
        args.extend(target.map(str::to_string));

        let text = self.exec(args, self.root()).await?;
        Ok(parse_list(&text))
    }

    /// `svn info [TARGET]`.
    ///
    /// # Errors
    ///
    /// Fails if the tool reports an error, e.g. when the root is not a
    /// working copy.
    pub async fn info(&self, target: Option<&str>) -> SvnResult<InfoRecord> {
        let mut args = vec!["info".to_string()];
        args.extend(target.map(str::to_string));

        let text = self.exec(args, self.root()).await?;
        Ok(parse_info(&text))
    }

    /// Node kind of `url` (`file`, `directory`), empty when unknown.
    ///
    /// # Errors
    ///
    /// Fails if the tool reports an error.
    pub async fn node_kind(&self, url: &str) -> SvnResult<String> {
        let info = self.info(Some(url)).await?;
        Ok(info.node_kind().unwrap_or_default().to_string())
    }

    /// `svn log [ARGS..] -v`, parsed against the working copy's info.
    ///
    /// The info is fetched after the log so that changed paths can be made
    /// relative to the working copy.
    ///
    /// # Errors
    ///
    /// Fails if either command reports an error.
    pub async fn log(&self, args: &[String]) -> SvnResult<Vec<LogEntry>> {
        let mut log_args = vec!["log".to_string()];
        log_args.extend(args.iter().cloned());
        log_args.push("-v".to_string());

        let text = self.exec(log_args, self.root()).await?;
        let info = self.info(None).await?;
        Ok(parse_log(&text, &info))
    }

    /// `svn status`, run in the root.
    ///
    /// # Errors
    ///
    /// Fails if the tool reports an error.
    pub async fn status(&self) -> SvnResult<Vec<StatusEntry>> {
        let text = self.exec(["status"], self.root()).await?;
        Ok(parse_status(&text))
    }

    /// `svn commit -m MESSAGE ROOT/FILES..`.
    ///
    /// # Errors
    ///
    /// Fails if the tool reports an error.
    pub async fn commit(&self, files: &[String], message: &str) -> SvnResult<String> {
        let mut args = vec!["commit".to_string(), "-m".to_string(), message.to_string()];
        args.extend(files.iter().map(|file| self.resolve(file)));

        self.exec(args, self.root()).await
    }

    /// `svn cleanup [PATH]`.
    ///
    /// # Errors
    ///
    /// Fails if the tool reports an error.
    pub async fn cleanup(&self, path: Option<&str>) -> SvnResult<()> {
        let mut args = vec!["cleanup".to_string()];
        args.extend(path.map(|path| self.resolve(path)));

        self.exec(args, self.root()).await?;
        Ok(())
    }

    /// Starts `queue` and returns its completion.
    #[must_use = "the deferred is the only way to observe completion"]
    pub fn queue(&self, queue: CommandQueue<SvnOutput>) -> SvnDeferred {
        debug!(root = %self.root().display(), steps = queue.len(), "starting queue");
        queue.run()
    }
}
