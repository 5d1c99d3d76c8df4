// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Strictly sequential execution of dependent asynchronous steps.
//!
//! ```text
//! CommandQueue::new()
//!   .push(step 1) .push(step 2) ... .push(step N)
//!   .run() --> Deferred<StepOutcome<T>>
//!
//!   Ok(T::default()) --> step 1 --> outcome 1 --> step 2 --> ... --> step N --> outcome N
//!                                                                                |
//!                                                                   Deferred::resolve
//! ```
//!
//! A failed step does not stop the queue. Every step receives the previous
//! outcome and decides whether an error is fatal or a branch signal. The
//! queue itself only reports the outcome of the last step.

mod deferred;


pub use deferred::Deferred;

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::error::SvnError;

/// Result of one queue step, passed to the next step.
pub type StepOutcome<T> = Result<T, SvnError>;

/// One unit of queued work, invoked with the previous step's outcome.
pub type QueueStep<T> =
    Box<dyn FnOnce(StepOutcome<T>) -> BoxFuture<'static, StepOutcome<T>> + Send>;

/// Ordered list of steps executed one at a time.
pub struct CommandQueue<T> {
    steps: Vec<QueueStep<T>>,
}

impl<T> Default for CommandQueue<T> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<T> fmt::Debug for CommandQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandQueue")
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl<T> CommandQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    ///
    /// Each step owns whatever it captured; nothing is shared between steps
    /// except the outcome handed from one to the next.
    pub fn push<F, Fut>(&mut self, step: F)
    where
        F: FnOnce(StepOutcome<T>) -> Fut + Send + 'static,
        Fut: Future<Output = StepOutcome<T>> + Send + 'static,
    {
        self.steps.push(Box::new(move |previous| step(previous).boxed()));
    }

    /// Appends a step, builder style.
    #[must_use]
    pub fn with_step<F, Fut>(mut self, step: F) -> Self
    where
        F: FnOnce(StepOutcome<T>) -> Fut + Send + 'static,
        Fut: Future<Output = StepOutcome<T>> + Send + 'static,
    {
        self.push(step);
        self
    }

    /// Returns the number of queued steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T: Default + Send + 'static> CommandQueue<T> {
    /// Executes every step in order on the current task.
    ///
    /// The first step receives `Ok(T::default())`. An empty queue returns
    /// that value without doing any work.
    pub async fn drain(self) -> StepOutcome<T> {
        let total = self.steps.len();
        let mut outcome: StepOutcome<T> = Ok(T::default());

        for (index, step) in self.steps.into_iter().enumerate() {
            tracing::debug!(step = index + 1, total, "running queue step");
            outcome = step(outcome).await;
            if let Err(e) = &outcome {
                tracing::debug!(step = index + 1, total, error = %e, "queue step failed");
            }
        }

        outcome
    }
}

impl<T: Clone + Default + Send + Sync + 'static> CommandQueue<T> {
    /// Starts the queue on a spawned task.
    ///
    /// The returned [`Deferred`] resolves with the last step's outcome. A
    /// step that panics ends the queue with [`SvnError::ExecutionFailed`]
    /// instead of leaving the deferred unresolved.
    #[must_use = "the deferred is the only way to observe completion"]
    pub fn run(self) -> Deferred<StepOutcome<T>> {
        let done = Deferred::new();
        let producer = done.clone();
        tokio::spawn(async move {
            let outcome = AssertUnwindSafe(self.drain())
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| {
                    let message = panic_message(payload.as_ref());
                    tracing::error!(%message, "queue step panicked");
                    Err(SvnError::ExecutionFailed {
                        command: "queue step".to_string(),
                        message: format!("panicked: {message}"),
                    })
                });
            producer.resolve(outcome);
        });
        done
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
