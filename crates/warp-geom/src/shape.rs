// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use glam::Vec3;

use crate::aabb::Aabb;

/// Geometric primitive, expressed in its own local frame.
///
/// Boxes and spheres are centered on the origin; cylinders run along the
/// local Z axis. Intersection math lives elsewhere; this type only carries
/// the data and its local bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Box with full side lengths along X, Y and Z.
    Box {
        /// Side lengths.
        size: Vec3,
    },
    /// Sphere.
    Sphere {
        /// Radius in meters.
        radius: f32,
    },
    /// Cylinder along local Z.
    Cylinder {
        /// Radius in meters.
        radius: f32,
        /// Full length along Z.
        length: f32,
    },
    /// Triangle mesh.
    Mesh {
        /// Vertex positions.
        vertices: Vec<Vec3>,
        /// Vertex index triples.
        triangles: Vec<[u32; 3]>,
    },
}

impl Shape {
    /// Short lowercase name of the primitive kind, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Cylinder { .. } => "cylinder",
            Self::Mesh { .. } => "mesh",
        }
    }

    /// Bounds in the shape's local frame. `None` for a mesh without vertices.
    #[must_use]
    pub fn local_aabb(&self) -> Option<Aabb> {
        match self {
            Self::Box { size } => Some(Aabb::from_center_half_extents(Vec3::ZERO, *size * 0.5)),
            Self::Sphere { radius } => Some(Aabb::from_center_half_extents(
                Vec3::ZERO,
                Vec3::splat(*radius),
            )),
            Self::Cylinder { radius, length } => Some(Aabb::from_center_half_extents(
                Vec3::ZERO,
                Vec3::new(*radius, *radius, length * 0.5),
            )),
            Self::Mesh { vertices, .. } => Aabb::from_points(vertices),
        }
    }
}
