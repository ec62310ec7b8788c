// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shape insertion strategy.
//!
//! Every shape an [`ObjectStore`](crate::ObjectStore) adds, whether through
//! the batch or the single-shape call, passes through exactly one
//! [`ShapeInserter::insert`]. Specialized stores plug in their own inserter
//! to keep per-shape bookkeeping without re-implementing validation or
//! notification.

use warp_geom::{Pose, ShapeHandle};

use crate::record::ObjectRecord;

/// Appends one shape to a record, unchecked.
///
/// The store has already validated the call and privatized `record`; the
/// inserter must leave `shapes` and `poses` aligned.
pub trait ShapeInserter {
    /// Appends `shape` at `pose`. The default body just pushes the pair.
    fn insert(&mut self, record: &mut ObjectRecord, shape: ShapeHandle, pose: Pose) {
        record.push_shape(shape, pose);
    }
}

/// Inserter with no extra bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInserter;

impl ShapeInserter for DefaultInserter {}
