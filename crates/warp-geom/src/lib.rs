// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry collaborators for the Echo collision world.

This crate provides:
- Rigid poses (`Pose`): translation plus unit-quaternion rotation.
- Axis-aligned bounding boxes (`Aabb`).
- Shape primitives (`Shape`) and shared shape handles (`ShapeHandle`) that
  carry an opaque identity (`ShapeId`).

Design notes:
- Shape identity is a token minted when a handle is built, never a
  structural comparison. Clones of a handle share its identity.
- Float32 throughout (`glam`); operations favor clarity over cleverness.
"]

/// Axis-aligned bounding boxes.
pub mod aabb;
/// Shape handles and their identity tokens.
pub mod handle;
/// Rigid transforms.
pub mod pose;
/// Shape primitives.
pub mod shape;

pub use aabb::Aabb;
pub use glam::{Mat4, Quat, Vec3};
pub use handle::{ShapeHandle, ShapeId};
pub use pose::Pose;
pub use shape::Shape;
