// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! echo-world: the object store behind collision checking.
//!
//! An [`ObjectStore`] maps object ids to shared [`ObjectRecord`]s (shapes
//! plus poses). Stores fork cheaply with `clone()` and privatize records on
//! write, so many planning attempts can diverge from one baseline without
//! deep copies. Every committed change is reported synchronously to the
//! store's observers as an [`ActionSet`].
#![forbid(unsafe_code)]

mod action;
mod bus;
/// Store configuration and its loading port.
pub mod config;
mod diff;
mod error;
mod inserter;
mod record;
mod store;

/// Change descriptors.
pub use action::{ActionSet, ChangeKind};
/// Subscription table types.
pub use bus::{ChangeBus, ChangeCallback, ObserverId};
pub use config::{ConfigError, ConfigSource, DirSource, StoreConfig};
/// Accumulated per-object changes.
pub use diff::StoreDiff;
pub use error::StoreError;
/// Shape insertion strategy.
pub use inserter::{DefaultInserter, ShapeInserter};
pub use record::ObjectRecord;
pub use store::ObjectStore;
/// Geometry collaborators, re-exported for convenience.
pub use warp_geom::{Aabb, Pose, Quat, Shape, ShapeHandle, ShapeId, Vec3};
