// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Object records: an id plus index-aligned shapes and poses.

use warp_geom::{Aabb, Pose, ShapeHandle};

/// One named object in the world.
///
/// Invariant: `shapes()[i]` is placed at `poses()[i]`; both sequences always
/// have the same length. Records held by a store are never empty.
///
/// Stores hand records out behind `Arc`. A record reachable from more than
/// one store is treated as frozen; a store that needs to change it clones it
/// first (see `ObjectStore`).
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    id: String,
    shapes: Vec<ShapeHandle>,
    poses: Vec<Pose>,
}

impl ObjectRecord {
    /// Creates an empty record for `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shapes: Vec::new(),
            poses: Vec::new(),
        }
    }

    /// The object id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Shapes in insertion order.
    pub fn shapes(&self) -> &[ShapeHandle] {
        &self.shapes
    }

    /// Poses, index-aligned with [`Self::shapes`].
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Number of (shape, pose) pairs.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// `true` when the record holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterates (shape, pose) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ShapeHandle, &Pose)> {
        self.shapes.iter().zip(self.poses.iter())
    }

    /// Index of the first pair whose shape has the identity of `shape`.
    pub fn shape_index(&self, shape: &ShapeHandle) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == shape.id())
    }

    /// `true` when a shape with the identity of `shape` is present.
    pub fn contains_shape(&self, shape: &ShapeHandle) -> bool {
        self.shape_index(shape).is_some()
    }

    /// Pose of the first pair matching `shape` by identity.
    pub fn pose_of(&self, shape: &ShapeHandle) -> Option<&Pose> {
        self.shape_index(shape).map(|i| &self.poses[i])
    }

    /// Appends a pair without any checks.
    pub fn push_shape(&mut self, shape: ShapeHandle, pose: Pose) {
        self.shapes.push(shape);
        self.poses.push(pose);
    }

    /// Replaces the pose at `index`. Returns `false` when out of range.
    pub(crate) fn set_pose(&mut self, index: usize, pose: Pose) -> bool {
        match self.poses.get_mut(index) {
            Some(slot) => {
                *slot = pose;
                true
            }
            None => false,
        }
    }

    /// Removes the pair at `index`.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<(ShapeHandle, Pose)> {
        if index >= self.shapes.len() {
            return None;
        }
        Some((self.shapes.remove(index), self.poses.remove(index)))
    }

    /// Left-composes `transform` onto every pose.
    pub(crate) fn transform_all(&mut self, transform: &Pose) {
        for pose in &mut self.poses {
            *pose = transform.compose(pose);
        }
    }

    /// Bounds of all shapes at their poses. `None` if no shape has bounds.
    pub fn world_aabb(&self) -> Option<Aabb> {
        self.iter()
            .filter_map(|(shape, pose)| shape.local_aabb().map(|b| b.transformed(pose)))
            .reduce(|acc, b| acc.union(&b))
    }
}
