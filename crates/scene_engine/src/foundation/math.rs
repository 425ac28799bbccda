//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the [`Transform`] every scene entity carries.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Rotation3, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi (f32)
    pub const PI: f32 = std::f32::consts::PI;
}

/// Spatial state of an entity: position, Euler rotation and scale.
///
/// The model matrix is derived data. It is only refreshed by
/// [`Transform::generate_model_matrix`], which entities call once per tick
/// after they finish mutating position, rotation or scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,

    /// Euler angles in radians (x = roll, y = pitch, z = yaw)
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,

    #[serde(skip, default = "Mat4::identity")]
    model: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            model: Mat4::identity(),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        let mut transform = Self {
            position,
            ..Default::default()
        };
        transform.generate_model_matrix();
        transform
    }

    /// Builder pattern: set a uniform scale
    #[must_use]
    pub fn with_uniform_scale(mut self, factor: f32) -> Self {
        self.scale = Vec3::new(factor, factor, factor);
        self.generate_model_matrix();
        self
    }

    /// Builder pattern: set the scale factors
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self.generate_model_matrix();
        self
    }

    /// Builder pattern: set the Euler rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self.generate_model_matrix();
        self
    }

    /// Compute translation * rotation * scale without touching the cache
    pub fn to_matrix(&self) -> Mat4 {
        let rotation =
            Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::new_translation(&self.position)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Recompute the cached model matrix from position, rotation and scale
    pub fn generate_model_matrix(&mut self) {
        self.model = self.to_matrix();
    }

    /// Cached model matrix from the last [`Transform::generate_model_matrix`] call
    pub fn model_matrix(&self) -> &Mat4 {
        &self.model
    }

    /// Position as a point, for distance queries
    pub fn point(&self) -> Point3 {
        Point3::from(self.position)
    }

    /// Euclidean distance between the positions of two transforms
    pub fn distance_to(&self, other: &Self) -> f32 {
        nalgebra::distance(&self.point(), &other.point())
    }
}

/// Utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_model_matrix_is_cached_until_regenerated() {
        let mut transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(transform.model_matrix().m14, 1.0);

        transform.position.x = 5.0;
        assert_relative_eq!(transform.model_matrix().m14, 1.0);

        transform.generate_model_matrix();
        assert_relative_eq!(transform.model_matrix().m14, 5.0);
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let transform = Transform::from_position(Vec3::new(2.0, 0.0, 0.0)).with_uniform_scale(0.5);
        let moved = transform.model_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Point3::new(2.5, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_about_y() {
        let transform = Transform::identity().with_rotation(Vec3::new(0.0, constants::PI / 2.0, 0.0));
        let rotated = transform.model_matrix().transform_vector(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_distance_between_transforms() {
        let a = Transform::from_position(Vec3::new(0.0, 0.0, 0.0));
        let b = Transform::from_position(Vec3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(a.distance_to(&b), 5.0);
    }
}
