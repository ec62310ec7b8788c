// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-object change accumulator fed by a store's observer callbacks.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::action::ActionSet;
use crate::bus::ObserverId;
use crate::inserter::ShapeInserter;
use crate::store::ObjectStore;

type Changes = BTreeMap<String, ActionSet>;

/// Records what changed about each object since the last reset.
///
/// Folding rules per id:
/// - `DESTROY` replaces whatever was recorded before.
/// - A change after `DESTROY` (the id was re-created) replaces the `DESTROY`.
/// - Otherwise bits accumulate.
#[derive(Debug, Default)]
pub struct StoreDiff {
    changes: Arc<Mutex<Changes>>,
    observer: Option<ObserverId>,
}

fn lock(changes: &Mutex<Changes>) -> MutexGuard<'_, Changes> {
    // A poisoned map only means a caller panicked mid-update; the data is
    // still a plain map of bitsets.
    changes.lock().unwrap_or_else(PoisonError::into_inner)
}

fn fold(changes: &mut Changes, id: &str, action: ActionSet) {
    match changes.get_mut(id) {
        Some(slot) if action.is_destroy() || slot.is_destroy() => *slot = action,
        Some(slot) => *slot |= action,
        None => {
            changes.insert(id.to_owned(), action);
        }
    }
}

impl StoreDiff {
    /// Creates a detached, empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a diff already observing `store`.
    pub fn attach<I: ShapeInserter>(store: &mut ObjectStore<I>) -> Self {
        let mut diff = Self::new();
        diff.observe(store);
        diff
    }

    /// Starts observing `store` and returns the subscription token.
    ///
    /// A diff holds at most one subscription. While attached this registers
    /// nothing and returns the existing token; detach first to observe a
    /// different store.
    pub fn observe<I: ShapeInserter>(&mut self, store: &mut ObjectStore<I>) -> ObserverId {
        if let Some(id) = self.observer {
            return id;
        }
        let sink = Arc::clone(&self.changes);
        let id = store.add_observer(move |record, action| {
            fold(&mut lock(&sink), record.id(), action);
        });
        self.observer = Some(id);
        id
    }

    /// Stops observing `store`. Recorded changes are kept.
    pub fn detach<I: ShapeInserter>(&mut self, store: &mut ObjectStore<I>) {
        if let Some(id) = self.observer.take() {
            store.remove_observer(id);
        }
    }

    /// Subscription token while attached.
    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    /// Snapshot of the recorded changes.
    pub fn changes(&self) -> BTreeMap<String, ActionSet> {
        lock(&self.changes).clone()
    }

    /// Recorded change for `id`, if any.
    pub fn get(&self, id: &str) -> Option<ActionSet> {
        lock(&self.changes).get(id).copied()
    }

    /// Returns the recorded changes and clears them.
    pub fn take(&mut self) -> BTreeMap<String, ActionSet> {
        std::mem::take(&mut *lock(&self.changes))
    }

    /// Forgets all recorded changes.
    pub fn reset(&mut self) {
        lock(&self.changes).clear();
    }

    /// `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        lock(&self.changes).is_empty()
    }
}
