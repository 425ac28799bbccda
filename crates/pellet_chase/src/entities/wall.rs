//! Static obstacles

use scene_engine::assets::ResourceDescriptor;
use scene_engine::foundation::math::Transform;
use scene_engine::physics::BoundingSphere;
use scene_engine::render::{ResourceSet, ShaderProgram};

use crate::config::WallConfig;

/// Assets shared by every wall instance
pub const WALL_RESOURCES: ResourceDescriptor = ResourceDescriptor {
    mesh: "cube.obj",
    shader: ShaderProgram::Object,
    texture: "white.png",
};

/// A wall that blocks horizontal player movement
#[derive(Debug, Clone)]
pub struct Wall {
    transform: Transform,
    resources: ResourceSet,
    radius: f32,
}

impl Wall {
    /// Create a wall from its config entry
    pub fn new(config: &WallConfig, resources: ResourceSet) -> Self {
        let transform = Transform::from_position(config.position).with_scale(config.scale);
        Self {
            radius: (config.radius_factor * config.scale.x).max(0.0),
            transform,
            resources,
        }
    }

    /// Spatial state
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Shared render resources
    pub const fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    /// Collision radius
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Collision volume
    pub fn bounds(&self) -> BoundingSphere {
        BoundingSphere::new(self.transform.position, self.radius)
    }

    /// Walls never move and never terminate
    pub fn update(&mut self) -> bool {
        self.transform.generate_model_matrix();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::resources_for;
    use crate::entities::EntityKind;
    use approx::assert_relative_eq;
    use scene_engine::foundation::math::Vec3;

    #[test]
    fn test_radius_scales_with_x() {
        let config = WallConfig {
            scale: Vec3::new(2.0, 5.0, 1.0),
            radius_factor: 0.5,
            ..Default::default()
        };
        let wall = Wall::new(&config, resources_for(EntityKind::Wall, &WALL_RESOURCES));
        assert_relative_eq!(wall.radius(), 1.0);
    }

    #[test]
    fn test_update_keeps_wall_in_place() {
        let mut wall = Wall::new(
            &WallConfig::at(Vec3::new(4.0, 2.0, 0.0)),
            resources_for(EntityKind::Wall, &WALL_RESOURCES),
        );
        assert!(wall.update());
        assert_eq!(wall.transform().position, Vec3::new(4.0, 2.0, 0.0));
        assert_relative_eq!(wall.transform().model_matrix()[(0, 3)], 4.0);
    }
}
