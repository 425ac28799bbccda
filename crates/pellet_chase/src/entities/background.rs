//! Screen-filling backdrop

use scene_engine::assets::ResourceDescriptor;
use scene_engine::foundation::math::{Transform, Vec3};
use scene_engine::render::{Renderer, ResourceSet, ShaderProgram, Uniforms};

use crate::config::BackgroundConfig;

/// Assets shared by every background instance
pub const BACKGROUND_RESOURCES: ResourceDescriptor = ResourceDescriptor {
    mesh: "quad.obj",
    shader: ShaderProgram::Space,
    texture: "background.png",
};

/// Backdrop quad drawn in screen space behind everything else
#[derive(Debug, Clone)]
pub struct Background {
    transform: Transform,
    resources: ResourceSet,
    scroll_speed: f32,
    offset: f32,
}

impl Background {
    /// Create a backdrop; z = 1 puts the quad at the back of clip space
    pub fn new(config: &BackgroundConfig, resources: ResourceSet) -> Self {
        Self {
            transform: Transform::from_position(Vec3::new(0.0, 0.0, 1.0)),
            resources,
            scroll_speed: config.scroll_speed,
            offset: 0.0,
        }
    }

    /// Spatial state
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Texture scroll offset in [0, 1)
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Advance the scroll offset; the backdrop is always kept
    pub fn update(&mut self, dt: f32) -> bool {
        self.offset = (self.offset + self.scroll_speed * dt).rem_euclid(1.0);
        self.transform.generate_model_matrix();
        true
    }

    /// Draw as-is, ignoring the camera
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.bind(&self.resources);
        renderer.draw(&Uniforms::screen_space(
            *self.transform.model_matrix(),
            self.offset,
        ));
    }
}
