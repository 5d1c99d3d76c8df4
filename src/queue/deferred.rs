// svnq: Subversion command queue and output parser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-resolution value shared between one producer and many consumers.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A value that is produced once and observed any number of times.
///
/// Clones share the same slot. The first [`resolve`](Self::resolve) wins;
/// later calls are rejected and never overwrite the stored value.
pub struct Deferred<T> {
    slot: Arc<watch::Sender<Option<T>>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(watch::Sender::new(None)),
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.slot.borrow().is_some())
            .finish()
    }
}

impl<T> Deferred<T> {
    /// Creates an unresolved instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the value and wakes every waiter.
    ///
    /// Returns `false` if the instance was already resolved; the new value
    /// is discarded.
    pub fn resolve(&self, value: T) -> bool {
        let stored = self.slot.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(value);
            true
        });
        if !stored {
            tracing::warn!("deferred value resolved twice, keeping the first value");
        }
        stored
    }

    /// Returns whether a value has been stored.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

impl<T: Clone> Deferred<T> {
    /// Returns the value if it has been stored.
    #[must_use]
    pub fn peek(&self) -> Option<T> {
        self.slot.borrow().clone()
    }

    /// Waits for the value.
    ///
    /// Returns immediately when already resolved.
    pub async fn settled(&self) -> T {
        let mut rx = self.slot.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(value) = current {
                return value;
            }
            // `self` keeps the sender alive, so the channel cannot close here
            let _ = rx.changed().await;
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Deferred<T> {
    /// Runs `continuation` on a spawned task once the value is available.
    ///
    /// The continuation never runs on the caller's stack, even if the value
    /// is already present. Any number of continuations may be registered.
    pub fn on_settled<F>(&self, continuation: F) -> JoinHandle<()>
    where
        F: FnOnce(T) + Send + 'static,
    {
        let this = self.clone();
        tokio::spawn(async move {
            let value = this.settled().await;
            continuation(value);
        })
    }
}
