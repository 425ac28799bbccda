//! Consumable pellets

use log::debug;
use scene_engine::assets::ResourceDescriptor;
use scene_engine::foundation::math::{Transform, Vec3};
use scene_engine::render::{ResourceSet, ShaderProgram};

use super::{Entity, TickContext};
use crate::config::PelletConfig;

/// Assets shared by every pellet instance
pub const PELLET_RESOURCES: ResourceDescriptor = ResourceDescriptor {
    mesh: "food.obj",
    shader: ShaderProgram::Object,
    texture: "white.png",
};

/// A pellet waiting to be collected
#[derive(Debug, Clone)]
pub struct Pellet {
    transform: Transform,
    resources: ResourceSet,
    radius: f32,
    terminal: bool,
}

impl Pellet {
    /// Create a live pellet at `position`
    pub fn new(position: Vec3, config: &PelletConfig, resources: ResourceSet) -> Self {
        let transform = Transform::from_position(position).with_uniform_scale(config.scale);
        Self {
            radius: transform.scale.x.max(0.0),
            transform,
            resources,
            terminal: false,
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

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Collision radius
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether the pellet has been consumed or merged away
    pub const fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Flag the pellet for removal at the next compaction
    pub fn mark_terminal(&mut self) {
        self.terminal = true;
    }

    /// Distance from this pellet's center to `point`
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (self.transform.position - point).norm()
    }

    /// Scan the neighbours once: a touching player consumes this pellet,
    /// overlapping pellets further along are merged into it.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) -> bool {
        if self.terminal {
            return false;
        }

        let merge_distance = 2.0 * self.radius;
        for neighbor in ctx.neighbors.iter_mut() {
            match neighbor {
                Entity::Player(player) if self.distance_to(player.position()) < player.radius() => {
                    player.add_point();
                    ctx.pellets.decrement();
                    self.terminal = true;
                    debug!("Pellet at {:?} consumed", self.transform.position);
                    return false;
                }
                Entity::Pellet(other)
                    if !other.terminal && self.distance_to(other.position()) < merge_distance =>
                {
                    other.mark_terminal();
                    ctx.pellets.decrement();
                    debug!(
                        "Pellet at {:?} merged into {:?}",
                        other.transform.position, self.transform.position
                    );
                }
                _ => {}
            }
        }

        self.transform.generate_model_matrix();
        true
    }
}
