// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use glam::{Mat4, Quat, Vec3};

/// Rigid transform used to place a shape inside an object.
///
/// Conventions:
/// - `translation` in meters (world space).
/// - `rotation` as a unit quaternion; constructors normalize it.
/// - Application order is rotate, then translate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    translation: Vec3,
    rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Identity pose (no translation, no rotation).
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    /// Creates a pose from components. `rotation` is normalized.
    #[must_use]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation: rotation.normalize(),
        }
    }

    /// Pure translation.
    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Pure rotation. `rotation` is normalized.
    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self::new(Vec3::ZERO, rotation)
    }

    /// Translation component.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Rotation component.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Returns `self * other`: `other` is applied first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            translation: self.transform_point(other.translation),
            rotation: (self.rotation * other.rotation).normalize(),
        }
    }

    /// Inverse rigid transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv = self.rotation.inverse();
        Self {
            translation: -(inv * self.translation),
            rotation: inv,
        }
    }

    /// Maps a point from the pose's local frame into its parent frame.
    #[must_use]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation * p + self.translation
    }

    /// `true` when every component is finite (no NaN or infinity).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite()
    }

    /// Returns the column-major `Mat4` corresponding to this pose.
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}
