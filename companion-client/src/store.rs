//! Observable host state.
//!
//! [`Store`] holds the host's [`SyncState`] and notifies subscribers when it
//! changes. Subscribers declare interest in one slice of the state through a
//! selector; a [`SliceWatch`] only wakes when its selected value actually
//! differs from the last one it reported, so redundant store updates do not
//! cause redundant publishes or session rotations.
//!
//! Built on `tokio::sync::watch`: notifications are delivered in commit
//! order, and a burst of updates may be coalesced into the latest value.

use companion_core::SyncState;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared, observable host state.
#[derive(Debug, Clone)]
pub struct Store {
    tx: Arc<watch::Sender<SyncState>>,
}

impl Store {
    /// Create a store holding `initial`.
    pub fn new(initial: SyncState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// A copy of the whole current state.
    pub fn state(&self) -> SyncState {
        self.tx.borrow().clone()
    }

    /// Read one value out of the current state.
    pub fn select<T>(&self, selector: impl FnOnce(&SyncState) -> T) -> T {
        selector(&self.tx.borrow())
    }

    /// Mutate the state and notify subscribers.
    pub fn update(&self, mutate: impl FnOnce(&mut SyncState)) {
        self.tx.send_modify(mutate);
    }

    /// Watch the slice of state chosen by `selector`.
    pub fn subscribe<T>(&self, selector: fn(&SyncState) -> T) -> SliceWatch<T>
    where
        T: Clone + PartialEq,
    {
        let rx = self.tx.subscribe();
        let last = selector(&rx.borrow());
        SliceWatch { rx, selector, last }
    }
}

/// Notifies when one slice of the store changes.
pub struct SliceWatch<T> {
    rx: watch::Receiver<SyncState>,
    selector: fn(&SyncState) -> T,
    last: T,
}

impl<T: Clone + PartialEq> SliceWatch<T> {
    /// Wait until the selected slice differs from the last reported value.
    ///
    /// Returns `None` once the store is gone. Cancel safe.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            self.rx.changed().await.ok()?;
            let current = (self.selector)(&self.rx.borrow_and_update());
            if current != self.last {
                self.last = current.clone();
                return Some(current);
            }
        }
    }

    /// The last value this watch reported (or saw at subscription).
    pub fn last(&self) -> &T {
        &self.last
    }
}
