//! The player-controlled collector

use log::{info, trace};
use scene_engine::assets::ResourceDescriptor;
use scene_engine::foundation::math::{constants::PI, Transform, Vec3};
use scene_engine::input::{InputState, KeyCode};
use scene_engine::physics::BoundingSphere;
use scene_engine::render::{ResourceSet, ShaderProgram};

use super::{Entity, TickContext};
use crate::config::{PlayArea, PlayerConfig};

/// Assets shared by every player instance
pub const PLAYER_RESOURCES: ResourceDescriptor = ResourceDescriptor {
    mesh: "pacman.obj",
    shader: ShaderProgram::Object,
    texture: "pacman.png",
};

/// Movement directions, declared in the order input is honoured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards +x (screen left, the camera looks down +z)
    Left,
    /// Towards -x
    Right,
    /// Towards +y
    Up,
    /// Towards -y
    Down,
}

impl Direction {
    /// All directions in priority order
    pub const PRIORITY: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Key bound to this direction
    pub const fn key(self) -> KeyCode {
        match self {
            Self::Left => KeyCode::Left,
            Self::Right => KeyCode::Right,
            Self::Up => KeyCode::Up,
            Self::Down => KeyCode::Down,
        }
    }

    /// First pressed direction in priority order that `allowed` accepts
    ///
    /// A pressed direction that `allowed` rejects falls through to the next
    /// pressed one.
    pub fn choose(input: &InputState, mut allowed: impl FnMut(Self) -> bool) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|direction| input.is_pressed(direction.key()) && allowed(*direction))
    }

    /// Unit step in world space
    pub fn step(self) -> Vec3 {
        match self {
            Self::Left => Vec3::x(),
            Self::Right => -Vec3::x(),
            Self::Up => Vec3::y(),
            Self::Down => -Vec3::y(),
        }
    }

    /// Model yaw that makes the mouth face the direction of travel
    pub fn facing(self) -> f32 {
        match self {
            Self::Left => 2.0 * PI,
            Self::Right => PI,
            Self::Up => PI / 2.0,
            Self::Down => -PI / 2.0,
        }
    }

    const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Player state
#[derive(Debug, Clone)]
pub struct Player {
    transform: Transform,
    resources: ResourceSet,
    play_area: PlayArea,
    speed: f32,
    radius: f32,
    score: u32,
}

impl Player {
    /// Create a player confined to `play_area`
    pub fn new(config: &PlayerConfig, play_area: PlayArea, resources: ResourceSet) -> Self {
        let transform = Transform::from_position(config.start_position)
            .with_scale(config.scale)
            .with_rotation(Vec3::new(PI / 5.0, PI / 2.0, 0.0));
        Self {
            radius: (config.radius_factor * config.scale.y).max(0.0),
            transform,
            resources,
            play_area,
            speed: config.speed,
            score: 0,
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

    /// Pellets collected so far
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Collision volume at the current position
    pub fn bounds(&self) -> BoundingSphere {
        BoundingSphere::new(self.transform.position, self.radius)
    }

    /// Credit one collected pellet
    pub fn add_point(&mut self) {
        self.score += 1;
        info!("Score is {}", self.score);
    }

    /// Move on input, then collect touching pellets. Never self-terminates.
    pub fn update(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> bool {
        let chosen = Direction::choose(ctx.input, |direction| {
            let candidate = self.candidate(direction, dt);
            let inside = self.play_area.contains(&candidate);
            if !inside {
                trace!("Move {:?} rejected: {:?} is outside the play area", direction, candidate);
            }
            inside
        });
        if let Some(direction) = chosen {
            self.steer(direction, ctx, dt);
        }
        self.collect_pellets(ctx);
        self.transform.generate_model_matrix();
        true
    }

    fn candidate(&self, direction: Direction, dt: f32) -> Vec3 {
        self.transform.position + direction.step() * self.speed * dt
    }

    /// Face and move towards `direction`, already known to stay in bounds
    fn steer(&mut self, direction: Direction, ctx: &TickContext<'_>, dt: f32) {
        let candidate = self.candidate(direction, dt);
        self.transform.rotation.y = direction.facing();

        if direction.is_horizontal() && self.blocked_by_wall(candidate, ctx) {
            trace!("Move {:?} rejected: blocked by a wall", direction);
            return;
        }
        self.transform.position = candidate;
    }

    /// A move is blocked when it ends inside a wall and gets closer to it;
    /// backing out of a wall the player already touches is allowed.
    fn blocked_by_wall(&self, candidate: Vec3, ctx: &TickContext<'_>) -> bool {
        let from = self.bounds();
        let to = from.moved_to(candidate);
        ctx.neighbors.walls().any(|wall| {
            let wall = wall.bounds();
            to.overlaps(&wall) && to.center_distance(&wall) < from.center_distance(&wall)
        })
    }

    fn collect_pellets(&mut self, ctx: &mut TickContext<'_>) {
        let position = self.transform.position;
        let radius = self.radius;
        let mut collected = 0;
        for neighbor in ctx.neighbors.iter_mut() {
            if let Entity::Pellet(pellet) = neighbor {
                if !pellet.is_terminal() && pellet.distance_to(position) < radius {
                    pellet.mark_terminal();
                    ctx.pellets.decrement();
                    collected += 1;
                }
            }
        }
        for _ in 0..collected {
            self.add_point();
        }
    }
}
