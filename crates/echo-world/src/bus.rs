// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subscription table and synchronous dispatch of object changes.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::action::ActionSet;
use crate::record::ObjectRecord;

/// Callback invoked for every committed change.
///
/// For [`ActionSet::DESTROY`] the record is the last state the store held
/// before dropping its binding.
pub type ChangeCallback = Box<dyn FnMut(&Arc<ObjectRecord>, ActionSet) + Send>;

/// Opaque token identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

struct Subscription {
    id: ObserverId,
    callback: ChangeCallback,
}

/// Registry of change callbacks.
///
/// Dispatch is synchronous and follows registration order. Callbacks only
/// see the record and the action, never the bus or the store, so they cannot
/// change subscriptions mid-dispatch. A callback that panics unwinds through
/// the mutating call; the bus makes no attempt to recover.
#[derive(Default)]
pub struct ChangeBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl ChangeBus {
    /// Creates a bus with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` and returns the token used to remove it.
    pub fn add_observer<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&Arc<ObjectRecord>, ActionSet) + Send + 'static,
    {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.subscriptions.push(Subscription {
            id,
            callback: Box::new(callback),
        });
        trace!(observer = ?id, "observer registered");
        id
    }

    /// Removes a subscription. Unknown or already-removed tokens are ignored;
    /// returns whether anything was removed.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }

    /// `true` when `id` is currently registered.
    pub fn contains(&self, id: ObserverId) -> bool {
        self.subscriptions.iter().any(|s| s.id == id)
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// `true` when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Delivers one change to every subscriber, in registration order.
    ///
    /// `action` must obey the DESTROY-alone rule (checked in debug builds).
    pub fn notify(&mut self, record: &Arc<ObjectRecord>, action: ActionSet) {
        debug_assert!(
            action.is_well_formed(),
            "DESTROY must be reported alone: {action:?}"
        );
        trace!(
            object = record.id(),
            ?action,
            observers = self.subscriptions.len(),
            "dispatching change"
        );
        for sub in &mut self.subscriptions {
            (sub.callback)(record, action);
        }
    }

    /// Delivers one change to a single subscriber. Returns `false` when `id`
    /// is unknown.
    pub fn notify_one(
        &mut self,
        id: ObserverId,
        record: &Arc<ObjectRecord>,
        action: ActionSet,
    ) -> bool {
        match self.subscriptions.iter_mut().find(|s| s.id == id) {
            Some(sub) => {
                (sub.callback)(record, action);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeBus")
            .field(
                "observers",
                &self.subscriptions.iter().map(|s| s.id).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
