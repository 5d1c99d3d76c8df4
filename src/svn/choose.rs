// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sparse checkout of selected sub-paths.
//!
//! ```text
//! choose(url, ["a/b/c"])
//!   info ROOT
//!   checkout URL ROOT --depth=empty      (--depth=infinity without sub-paths)
//!   update a     --depth=empty
//!   update a/b   --depth=empty
//!   update a/b/c                         (full content)
//! ```
//!
//! The plan is computed up front as plain data, then each step is turned
//! into a queue step that owns its own copy of the step.

use serde::Serialize;
use tracing::{debug, warn};

use super::{Depth, Svn, SvnDeferred, SvnOutput};
use crate::queue::{CommandQueue, StepOutcome};

/// What a planned step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChooseKind {
    /// `svn info` of the root. Only observed, never fatal.
    Info,
    /// Checkout of the URL into the root.
    Checkout { depth: Depth },
    /// Update of a path below the root. `None` fetches everything.
    Update { depth: Option<Depth> },
}

/// One planned step; `path` is relative to the root, empty for the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChooseStep {
    #[serde(flatten)]
    pub kind: ChooseKind,
    pub path: String,
}

impl ChooseStep {
    const fn new(kind: ChooseKind, path: String) -> Self {
        Self { kind, path }
    }
}

/// Plans the steps that materialize `sub_paths` below the root.
///
/// Leading and trailing slashes are ignored and empty sub-paths are
/// skipped. Every intermediate directory gets an empty-depth update before
/// the deepest segment gets a full update, so parents always exist first.
#[must_use]
pub fn plan_choose<S: AsRef<str>>(sub_paths: &[S]) -> Vec<ChooseStep> {
    let sub_paths: Vec<&str> = sub_paths
        .iter()
        .map(|path| path.as_ref().trim_matches('/'))
        .filter(|path| !path.is_empty())
        .collect();

    let checkout_depth = if sub_paths.is_empty() {
        Depth::Infinity
    } else {
        Depth::Empty
    };

    let mut steps = vec![
        ChooseStep::new(ChooseKind::Info, String::new()),
        ChooseStep::new(
            ChooseKind::Checkout {
                depth: checkout_depth,
            },
            String::new(),
        ),
    ];

    for sub_path in sub_paths {
        let segments: Vec<&str> = sub_path.split('/').filter(|s| !s.is_empty()).collect();
        for end in 1..=segments.len() {
            let depth = (end < segments.len()).then_some(Depth::Empty);
            steps.push(ChooseStep::new(
                ChooseKind::Update { depth },
                segments[..end].join("/"),
            ));
        }
    }

    steps
}

/// `url` with `path` appended, without doubled slashes.
fn join_url(url: &str, path: &str) -> String {
    let url = url.trim_end_matches('/');
    if path.is_empty() {
        url.to_string()
    } else {
        format!("{url}/{path}")
    }
}

impl Svn {
    /// Checks out `url` into the root and materializes only `sub_paths`.
    ///
    /// Resolves once every planned step has run, with [`SvnOutput::Empty`]
    /// on success: the result is the working copy on disk. A failed step is
    /// logged and handed to the next one; only the last step's failure is
    /// reported.
    #[must_use = "the deferred is the only way to observe completion"]
    pub fn choose<S: AsRef<str>>(&self, url: &str, sub_paths: &[S]) -> SvnDeferred {
        let plan = plan_choose(sub_paths);
        debug!(url, steps = plan.len(), "planned sparse checkout");
        let queue = self
            .choose_queue(url, plan)
            .with_step(|last| async move { last.map(|_| SvnOutput::Empty) });
        self.queue(queue)
    }

    /// Turns a plan into queue steps.
    pub(crate) fn choose_queue(&self, url: &str, plan: Vec<ChooseStep>) -> CommandQueue<SvnOutput> {
        let mut queue = CommandQueue::new();
        for step in plan {
            let svn = self.clone();
            let url = url.to_string();
            queue.push(move |previous| async move {
                svn.run_choose_step(&url, &step, previous).await
            });
        }
        queue
    }

    async fn run_choose_step(
        &self,
        url: &str,
        step: &ChooseStep,
        previous: StepOutcome<SvnOutput>,
    ) -> StepOutcome<SvnOutput> {
        match step.kind {
            ChooseKind::Info => self.info(None).await.map(SvnOutput::Info),
            ChooseKind::Checkout { depth } => {
                match &previous {
                    Err(e) => debug!(error = %e, "root is not a working copy yet"),
                    Ok(_) => debug!("root is already a working copy"),
                }
                self.checkout(&join_url(url, &step.path), None, Some(depth))
                    .await
                    .map(SvnOutput::Actions)
            }
            ChooseKind::Update { depth } => {
                if let Err(e) = &previous {
                    warn!(path = %step.path, error = %e, "previous step failed, continuing");
                }
                self.update(std::slice::from_ref(&step.path), depth, None)
                    .await
                    .map(SvnOutput::Actions)
            }
        }
    }
}
