//! Bounding-sphere overlap tests

use crate::foundation::math::{Point3, Vec3};

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Point3,
    /// The radius of the sphere (never negative)
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere; negative radii are clamped to zero
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center: Point3::from(center),
            radius: radius.max(0.0),
        }
    }

    /// Distance between the two centers
    pub fn center_distance(&self, other: &Self) -> f32 {
        nalgebra::distance(&self.center, &other.center)
    }

    /// Strict overlap: distance between centers < sum of radii
    ///
    /// Touching spheres (distance == sum) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.center_distance(other) < self.radius + other.radius
    }

    /// Whether `point` lies strictly inside the sphere
    pub fn contains(&self, point: &Point3) -> bool {
        nalgebra::distance(&self.center, point) < self.radius
    }

    /// The same sphere moved to `center`
    #[must_use]
    pub fn moved_to(&self, center: Vec3) -> Self {
        Self::new(center, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_touching_spheres_do_not_overlap() {
        let a = BoundingSphere::new(Vec3::new(0.0, 0.0, 0.0), 0.5);
        let b = BoundingSphere::new(Vec3::new(1.0, 0.0, 0.0), 0.5);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&b.moved_to(Vec3::new(0.99, 0.0, 0.0))));
    }

    #[test]
    fn test_negative_radius_is_clamped() {
        let sphere = BoundingSphere::new(Vec3::zeros(), -2.0);
        assert_relative_eq!(sphere.radius, 0.0);
        assert!(!sphere.contains(&Point3::origin()));
    }
}
