// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Copy-on-write object store with synchronous change notification.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace, warn};
use warp_geom::{Pose, ShapeHandle};

use crate::action::ActionSet;
use crate::bus::{ChangeBus, ObserverId};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::inserter::{DefaultInserter, ShapeInserter};
use crate::record::ObjectRecord;

/// Map from object id to shared [`ObjectRecord`]s.
///
/// Cloning a store copies the id map only; records are shared by `Arc`
/// until one side writes. Every write path privatizes just the record it
/// touches, so a clone never observes the other store's later edits. The
/// clone starts with no observers.
///
/// Every committed change is reported to the store's observers after the
/// map has been updated. Ids map to non-empty records: removing the last
/// shape of an object removes the object.
///
/// A store has a single writer; callers serialize access to one instance.
#[derive(Debug)]
pub struct ObjectStore<I = DefaultInserter> {
    objects: BTreeMap<String, Arc<ObjectRecord>>,
    bus: ChangeBus,
    inserter: I,
    config: StoreConfig,
}

impl Default for ObjectStore<DefaultInserter> {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore<DefaultInserter> {
    /// Empty store with the default config.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Empty store with `config`.
    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_inserter(config, DefaultInserter)
    }
}

impl<I: Clone> Clone for ObjectStore<I> {
    fn clone(&self) -> Self {
        trace!(
            store = %self.config.label,
            objects = self.objects.len(),
            "forking store"
        );
        Self {
            objects: self.objects.clone(),
            bus: ChangeBus::new(),
            inserter: self.inserter.clone(),
            config: self.config.clone(),
        }
    }
}

/// Returns a mutable record, cloning it first when another holder shares it.
fn ensure_unique<'a>(label: &str, entry: &'a mut Arc<ObjectRecord>) -> &'a mut ObjectRecord {
    if Arc::get_mut(entry).is_none() {
        trace!(store = label, object = entry.id(), "privatizing shared record");
    }
    Arc::make_mut(entry)
}

impl<I: ShapeInserter> ObjectStore<I> {
    /// Empty store using `inserter` for every shape it adds.
    pub fn with_inserter(config: StoreConfig, inserter: I) -> Self {
        Self {
            objects: BTreeMap::new(),
            bus: ChangeBus::new(),
            inserter,
            config,
        }
    }

    /// The store's config.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The shape inserter.
    pub fn inserter(&self) -> &I {
        &self.inserter
    }

    /// Mutable access to the shape inserter.
    pub fn inserter_mut(&mut self) -> &mut I {
        &mut self.inserter
    }

    /// Ids of all present objects, in the iteration order of [`Self::objects`].
    pub fn object_ids(&self) -> Vec<String> {
        self.objects.keys().cloned().collect()
    }

    /// Read-only view of the whole id → record map.
    pub fn objects(&self) -> &BTreeMap<String, Arc<ObjectRecord>> {
        &self.objects
    }

    /// Number of present objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// `true` when the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The record for `id`, if present.
    pub fn object(&self, id: &str) -> Option<&Arc<ObjectRecord>> {
        self.objects.get(id)
    }

    /// `true` when `id` is present.
    pub fn has_object(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    /// Adds index-aligned `shapes` and `poses` to object `id`, creating it
    /// when absent.
    ///
    /// Emits one `CREATE` for a new object or one `ADD_SHAPE` for an
    /// existing one. An empty batch changes nothing and emits nothing.
    ///
    /// # Errors
    /// [`StoreError::LengthMismatch`] when the slices differ in length, and
    /// [`StoreError::NonFinitePose`] when configured to reject such poses. A
    /// rejected call leaves the store untouched.
    pub fn add_to_object(
        &mut self,
        id: &str,
        shapes: &[ShapeHandle],
        poses: &[Pose],
    ) -> Result<(), StoreError> {
        if shapes.len() != poses.len() {
            warn!(
                store = %self.config.label,
                object = id,
                shapes = shapes.len(),
                poses = poses.len(),
                "rejected add: shape/pose count mismatch"
            );
            return Err(StoreError::LengthMismatch {
                id: id.to_owned(),
                shapes: shapes.len(),
                poses: poses.len(),
            });
        }
        self.check_poses(id, poses)?;
        if shapes.is_empty() {
            return Ok(());
        }
        self.append(id, shapes.iter().cloned().zip(poses.iter().copied()));
        Ok(())
    }

    /// Adds a single shape at `pose` to object `id`, creating it when absent.
    /// Same notifications as [`Self::add_to_object`].
    ///
    /// # Errors
    /// [`StoreError::NonFinitePose`] when configured to reject such poses.
    pub fn add_shape_to_object(
        &mut self,
        id: &str,
        shape: ShapeHandle,
        pose: Pose,
    ) -> Result<(), StoreError> {
        self.check_poses(id, std::slice::from_ref(&pose))?;
        self.append(id, std::iter::once((shape, pose)));
        Ok(())
    }

    /// Replaces the pose of the shape with `shape`'s identity.
    ///
    /// Returns `Ok(false)` without notifying when the object or the shape is
    /// unknown; otherwise emits `MOVE_SHAPE`.
    ///
    /// # Errors
    /// [`StoreError::NonFinitePose`] when configured to reject such poses.
    pub fn move_shape_in_object(
        &mut self,
        id: &str,
        shape: &ShapeHandle,
        pose: Pose,
    ) -> Result<bool, StoreError> {
        self.check_poses(id, std::slice::from_ref(&pose))?;
        let Some(entry) = self.objects.get_mut(id) else {
            return Ok(false);
        };
        let Some(index) = entry.shape_index(shape) else {
            return Ok(false);
        };
        ensure_unique(&self.config.label, entry).set_pose(index, pose);
        self.bus.notify(entry, ActionSet::MOVE_SHAPE);
        Ok(true)
    }

    /// Applies `transform` on top of every shape pose of object `id`.
    ///
    /// Returns `Ok(false)` when the object is unknown; otherwise emits
    /// `MOVE_SHAPE`.
    ///
    /// # Errors
    /// [`StoreError::NonFinitePose`] when configured to reject such poses.
    pub fn move_object(&mut self, id: &str, transform: &Pose) -> Result<bool, StoreError> {
        self.check_poses(id, std::slice::from_ref(transform))?;
        let Some(entry) = self.objects.get_mut(id) else {
            return Ok(false);
        };
        ensure_unique(&self.config.label, entry).transform_all(transform);
        self.bus.notify(entry, ActionSet::MOVE_SHAPE);
        Ok(true)
    }

    /// Removes the (shape, pose) pair whose shape has `shape`'s identity.
    ///
    /// Removing the last shape removes the object and emits only `DESTROY`;
    /// otherwise emits `REMOVE_SHAPE`. Returns `false` without notifying
    /// when the object or the shape is unknown.
    pub fn remove_shape_from_object(&mut self, id: &str, shape: &ShapeHandle) -> bool {
        let found = self
            .objects
            .get(id)
            .and_then(|rec| rec.shape_index(shape).map(|index| (index, rec.len() == 1)));
        let Some((index, last)) = found else {
            return false;
        };
        if last {
            return self.remove_object(id);
        }
        let Some(entry) = self.objects.get_mut(id) else {
            return false;
        };
        ensure_unique(&self.config.label, entry).remove_at(index);
        self.bus.notify(entry, ActionSet::REMOVE_SHAPE);
        true
    }

    /// Removes object `id` and emits `DESTROY` with its last record.
    /// Returns `false` when absent.
    pub fn remove_object(&mut self, id: &str) -> bool {
        let Some(record) = self.objects.remove(id) else {
            return false;
        };
        debug!(store = %self.config.label, object = id, "object destroyed");
        self.bus.notify(&record, ActionSet::DESTROY);
        true
    }

    /// Removes every object, emitting one `DESTROY` per object in id order.
    pub fn clear_objects(&mut self) {
        let removed = std::mem::take(&mut self.objects);
        debug!(
            store = %self.config.label,
            objects = removed.len(),
            "clearing objects"
        );
        for record in removed.values() {
            self.bus.notify(record, ActionSet::DESTROY);
        }
    }

    /// Registers a change callback. See [`ChangeBus::add_observer`].
    pub fn add_observer<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&Arc<ObjectRecord>, ActionSet) + Send + 'static,
    {
        self.bus.add_observer(callback)
    }

    /// Removes a change callback; unknown ids are ignored.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.bus.remove_observer(id)
    }

    /// The store's subscription table.
    pub fn observers(&self) -> &ChangeBus {
        &self.bus
    }

    /// Calls only observer `id` once per present object with `action`.
    ///
    /// Lets a consumer that attaches late catch up with the current state.
    /// Returns `false` (and calls nothing) when `id` is unknown.
    pub fn notify_observer_all_objects(&mut self, id: ObserverId, action: ActionSet) -> bool {
        if !self.bus.contains(id) {
            return false;
        }
        for record in self.objects.values() {
            self.bus.notify_one(id, record, action);
        }
        true
    }

    fn append(&mut self, id: &str, pairs: impl IntoIterator<Item = (ShapeHandle, Pose)>) {
        let created = !self.objects.contains_key(id);
        let entry = self
            .objects
            .entry(id.to_owned())
            .or_insert_with(|| Arc::new(ObjectRecord::new(id)));
        let record = ensure_unique(&self.config.label, entry);
        for (shape, pose) in pairs {
            self.inserter.insert(record, shape, pose);
        }
        let action = if created {
            debug!(store = %self.config.label, object = id, shapes = record.len(), "object created");
            ActionSet::CREATE
        } else {
            ActionSet::ADD_SHAPE
        };
        self.bus.notify(entry, action);
    }

    fn check_poses(&self, id: &str, poses: &[Pose]) -> Result<(), StoreError> {
        if self.config.reject_non_finite_poses && poses.iter().any(|p| !p.is_finite()) {
            warn!(store = %self.config.label, object = id, "rejected non-finite pose");
            return Err(StoreError::NonFinitePose { id: id.to_owned() });
        }
        Ok(())
    }
}
