// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::shape::Shape;

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity token for a shape handle.
///
/// Minted once per [`ShapeHandle::new`]; never derived from shape contents.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u64);

impl ShapeId {
    fn mint() -> Self {
        Self(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw token value; stable for the lifetime of the process only.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeId(#{})", self.0)
    }
}

/// Shared, immutable shape with an identity token.
///
/// Cloning is cheap and preserves identity, so a clone can be used to move
/// or remove the shape it was cloned from. Equality compares identity only:
/// two handles built from equal shapes are different handles.
#[derive(Clone)]
pub struct ShapeHandle {
    id: ShapeId,
    shape: Arc<Shape>,
}

impl ShapeHandle {
    /// Wraps `shape` and mints a fresh identity for it.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self::from_arc(Arc::new(shape))
    }

    /// Mints a fresh identity around an already shared shape.
    #[must_use]
    pub fn from_arc(shape: Arc<Shape>) -> Self {
        Self {
            id: ShapeId::mint(),
            shape,
        }
    }

    /// Identity token of this handle.
    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// The underlying shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl Deref for ShapeHandle {
    type Target = Shape;

    fn deref(&self) -> &Shape {
        &self.shape
    }
}

impl PartialEq for ShapeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ShapeHandle {}

impl fmt::Debug for ShapeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeHandle")
            .field("id", &self.id)
            .field("kind", &self.shape.kind())
            .finish()
    }
}

impl From<Shape> for ShapeHandle {
    fn from(shape: Shape) -> Self {
        Self::new(shape)
    }
}
