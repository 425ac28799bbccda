//! Scene entities
//!
//! The world is a flat, ordered list of [`Entity`] values. Each variant owns
//! its own state and implements the per-tick `update`/`render` pair; the enum
//! dispatches to them and lets variants recognise each other by matching on
//! the variant instead of probing types at runtime.
//!
//! During an update pass an entity sees the rest of the world through a
//! [`TickContext`]. It may read its neighbours, flag them terminal or bump a
//! player's score, but it can never add or remove entities directly: spawns
//! are queued as [`SpawnRequest`]s and removal happens in the scene's
//! compaction step.

mod background;
mod pellet;
mod player;
mod spawner;
mod wall;

pub use background::{Background, BACKGROUND_RESOURCES};
pub use pellet::{Pellet, PELLET_RESOURCES};
pub use player::{Direction, Player, PLAYER_RESOURCES};
pub use spawner::{Spawner, SpawnerState};
pub use wall::{Wall, WALL_RESOURCES};

use scene_engine::assets::ResourceDescriptor;
use scene_engine::foundation::math::{Transform, Vec3};
use scene_engine::input::InputState;
use scene_engine::render::{Camera, Renderer, ResourceSet, Uniforms};

use crate::scene::PelletCounter;

/// Entity type tag, also the key of the shared resource registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Scrolling backdrop
    Background,
    /// Static obstacle
    Wall,
    /// Player-controlled collector
    Player,
    /// Consumable pellet
    Pellet,
    /// Pellet factory
    Spawner,
}

impl EntityKind {
    /// Asset identifiers every instance of this kind renders with
    ///
    /// `None` for kinds that never draw.
    pub const fn descriptor(self) -> Option<&'static ResourceDescriptor> {
        match self {
            Self::Background => Some(&BACKGROUND_RESOURCES),
            Self::Wall => Some(&WALL_RESOURCES),
            Self::Player => Some(&PLAYER_RESOURCES),
            Self::Pellet => Some(&PELLET_RESOURCES),
            Self::Spawner => None,
        }
    }
}

/// Entity creation queued during an update pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    /// A new pellet at `position`
    Pellet {
        /// World position of the new pellet
        position: Vec3,
    },
}

/// Every entity except the one being updated
///
/// The scene splits its collection around the current index, so the
/// neighbours are exactly the entities that existed when the pass started.
#[derive(Debug)]
pub struct Neighbors<'a> {
    before: &'a mut [Entity],
    after: &'a mut [Entity],
}

impl<'a> Neighbors<'a> {
    /// Neighbour view from the slices on either side of the current entity
    pub fn new(before: &'a mut [Entity], after: &'a mut [Entity]) -> Self {
        Self { before, after }
    }

    /// Neighbours in collection order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.before.iter().chain(self.after.iter())
    }

    /// Mutable neighbours in collection order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.before.iter_mut().chain(self.after.iter_mut())
    }

    /// Every wall among the neighbours
    pub fn walls(&self) -> impl Iterator<Item = &Wall> + '_ {
        self.iter().filter_map(Entity::as_wall)
    }

    /// Number of neighbours
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    /// Whether the entity being updated is alone in the scene
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The scene as seen by one entity during the update pass
#[derive(Debug)]
pub struct TickContext<'a> {
    /// All other entities
    pub neighbors: Neighbors<'a>,
    /// Key state polled for this tick
    pub input: &'a InputState,
    /// Live pellet population
    pub pellets: &'a mut PelletCounter,
    /// Spawns to apply after the update pass
    pub spawns: &'a mut Vec<SpawnRequest>,
}

/// A live scene object
#[derive(Debug)]
pub enum Entity {
    /// Scrolling backdrop
    Background(Background),
    /// Static obstacle
    Wall(Wall),
    /// Player-controlled collector
    Player(Player),
    /// Consumable pellet
    Pellet(Pellet),
    /// Pellet factory
    Spawner(Spawner),
}

impl Entity {
    /// Type tag
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Background(_) => EntityKind::Background,
            Self::Wall(_) => EntityKind::Wall,
            Self::Player(_) => EntityKind::Player,
            Self::Pellet(_) => EntityKind::Pellet,
            Self::Spawner(_) => EntityKind::Spawner,
        }
    }

    /// Spatial state
    pub fn transform(&self) -> &Transform {
        match self {
            Self::Background(background) => background.transform(),
            Self::Wall(wall) => wall.transform(),
            Self::Player(player) => player.transform(),
            Self::Pellet(pellet) => pellet.transform(),
            Self::Spawner(spawner) => spawner.transform(),
        }
    }

    /// Advance one tick; `false` asks the scene to remove this entity
    pub fn update(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> bool {
        match self {
            Self::Background(background) => background.update(dt),
            Self::Wall(wall) => wall.update(),
            Self::Player(player) => player.update(ctx, dt),
            Self::Pellet(pellet) => pellet.update(ctx),
            Self::Spawner(spawner) => spawner.update(ctx, dt),
        }
    }

    /// Issue this entity's draw calls
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R, camera: &Camera) {
        match self {
            Self::Background(background) => background.render(renderer),
            Self::Wall(wall) => draw_object(renderer, wall.resources(), wall.transform(), camera),
            Self::Player(player) => {
                draw_object(renderer, player.resources(), player.transform(), camera);
            }
            Self::Pellet(pellet) => {
                draw_object(renderer, pellet.resources(), pellet.transform(), camera);
            }
            Self::Spawner(_) => {}
        }
    }

    /// Whether the entity is flagged for removal
    ///
    /// Only pellets can become terminal.
    pub const fn is_terminal(&self) -> bool {
        match self {
            Self::Pellet(pellet) => pellet.is_terminal(),
            _ => false,
        }
    }

    /// The player, if this is one
    pub const fn as_player(&self) -> Option<&Player> {
        match self {
            Self::Player(player) => Some(player),
            _ => None,
        }
    }

    /// The pellet, if this is one
    pub const fn as_pellet(&self) -> Option<&Pellet> {
        match self {
            Self::Pellet(pellet) => Some(pellet),
            _ => None,
        }
    }

    /// The wall, if this is one
    pub const fn as_wall(&self) -> Option<&Wall> {
        match self {
            Self::Wall(wall) => Some(wall),
            _ => None,
        }
    }

    /// The spawner, if this is one
    pub const fn as_spawner(&self) -> Option<&Spawner> {
        match self {
            Self::Spawner(spawner) => Some(spawner),
            _ => None,
        }
    }

    /// Whether this is a live (non-terminal) pellet
    pub const fn is_live_pellet(&self) -> bool {
        matches!(self, Self::Pellet(pellet) if !pellet.is_terminal())
    }
}

fn draw_object<R: Renderer + ?Sized>(
    renderer: &mut R,
    resources: &ResourceSet,
    transform: &Transform,
    camera: &Camera,
) {
    renderer.bind(resources);
    renderer.draw(&Uniforms::with_camera(*transform.model_matrix(), camera));
}

impl From<Background> for Entity {
    fn from(background: Background) -> Self {
        Self::Background(background)
    }
}

impl From<Wall> for Entity {
    fn from(wall: Wall) -> Self {
        Self::Wall(wall)
    }
}

impl From<Player> for Entity {
    fn from(player: Player) -> Self {
        Self::Player(player)
    }
}

impl From<Pellet> for Entity {
    fn from(pellet: Pellet) -> Self {
        Self::Pellet(pellet)
    }
}

impl From<Spawner> for Entity {
    fn from(spawner: Spawner) -> Self {
        Self::Spawner(spawner)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use scene_engine::assets::{ResourceDescriptor, ResourceRegistry};
    use scene_engine::input::InputState;
    use scene_engine::render::{RecordingRenderer, ResourceSet};

    use super::{Entity, EntityKind, Neighbors, SpawnRequest, TickContext};
    use crate::scene::PelletCounter;

    /// Resource triple for `kind` from a throwaway recording backend
    pub fn resources_for(kind: EntityKind, descriptor: &ResourceDescriptor) -> ResourceSet {
        let mut renderer = RecordingRenderer::new();
        ResourceRegistry::new()
            .ensure_loaded(kind, descriptor, &mut renderer)
            .unwrap()
    }

    /// Run `update` on `world[index]` with the rest of `world` as neighbours
    pub fn update_at(
        world: &mut [Entity],
        index: usize,
        input: &InputState,
        pellets: &mut PelletCounter,
        spawns: &mut Vec<SpawnRequest>,
        dt: f32,
    ) -> bool {
        let (before, rest) = world.split_at_mut(index);
        let (current, after) = rest.split_first_mut().unwrap();
        let mut ctx = TickContext {
            neighbors: Neighbors::new(before, after),
            input,
            pellets,
            spawns,
        };
        current.update(&mut ctx, dt)
    }
}
