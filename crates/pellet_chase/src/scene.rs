//! The scene: entity collection, input, camera and the two-phase tick
//!
//! A tick runs in two strictly separated phases:
//!
//! 1. **Update pass.** Every entity present when the pass starts is updated
//!    once, in collection order. Entities see each other through a
//!    [`TickContext`] and may only flag neighbours terminal or queue spawns.
//! 2. **Compaction.** Entities whose update returned `false` and pellets that
//!    were flagged terminal are removed, then queued spawns are instantiated
//!    and appended. New entities are first updated on the following tick.
//!
//! Rendering happens after compaction and never draws a terminal entity.

use log::{debug, info, warn};
use scene_engine::assets::{AssetError, ResourceRegistry};
use scene_engine::foundation::math::Vec3;
use scene_engine::input::{InputSource, InputState};
use scene_engine::render::{AssetLoader, Camera, RenderError, Renderer, ResourceSet};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::entities::{
    Background, Entity, EntityKind, Neighbors, Pellet, Player, SpawnRequest, Spawner,
    TickContext, Wall,
};

/// Number of live pellets in the scene
///
/// Kept equal to the number of non-terminal pellets after every compaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PelletCounter {
    live: usize,
}

impl PelletCounter {
    /// Counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count
    pub const fn count(&self) -> usize {
        self.live
    }

    /// One more live pellet
    pub fn increment(&mut self) {
        self.live += 1;
    }

    /// One fewer live pellet; saturates at zero
    pub fn decrement(&mut self) {
        debug_assert!(self.live > 0, "pellet counter decremented below zero");
        if self.live == 0 {
            warn!("Pellet counter would go negative, clamping at zero");
            return;
        }
        self.live -= 1;
    }

    fn reset(&mut self, live: usize) {
        self.live = live;
    }
}

/// Owner of every live entity
#[derive(Debug)]
pub struct Scene {
    entities: Vec<Entity>,
    pending: Vec<SpawnRequest>,
    input: InputState,
    camera: Camera,
    pellets: PelletCounter,
    resources: ResourceRegistry<EntityKind>,
    config: GameConfig,
    ticks: u64,
}

impl Scene {
    /// Empty scene viewed through `camera`
    pub fn new(config: GameConfig, camera: Camera) -> Self {
        Self {
            entities: Vec::new(),
            pending: Vec::new(),
            input: InputState::new(),
            camera,
            pellets: PelletCounter::new(),
            resources: ResourceRegistry::new(),
            config,
            ticks: 0,
        }
    }

    /// Add the starting entities: backdrop, spawner, walls and the player
    pub fn populate<L: AssetLoader + ?Sized>(
        &mut self,
        loader: &mut L,
    ) -> Result<(), AssetError> {
        let resources = self.shared(EntityKind::Background, loader)?;
        let background = Background::new(&self.config.background, resources);
        self.add(background);

        let spawner = Spawner::new(&self.config.spawner);
        self.add(spawner);

        if !self.config.walls.is_empty() {
            let resources = self.shared(EntityKind::Wall, loader)?;
            let walls: Vec<Wall> = self
                .config
                .walls
                .iter()
                .map(|wall| Wall::new(wall, resources))
                .collect();
            for wall in walls {
                self.add(wall);
            }
        }

        let resources = self.shared(EntityKind::Player, loader)?;
        let player = Player::new(&self.config.player, self.config.play_area, resources);
        self.add(player);

        info!(
            "Scene populated with {} entities ({} walls)",
            self.entities.len(),
            self.config.walls.len()
        );
        Ok(())
    }

    /// Append an entity; it is first updated on the next tick
    pub fn add(&mut self, entity: impl Into<Entity>) {
        let entity = entity.into();
        if entity.is_live_pellet() {
            self.pellets.increment();
        }
        self.entities.push(entity);
    }

    /// Create a pellet at `position` using the shared pellet resources
    pub fn spawn_pellet<L: AssetLoader + ?Sized>(
        &mut self,
        position: Vec3,
        loader: &mut L,
    ) -> Result<(), AssetError> {
        let resources = self.shared(EntityKind::Pellet, loader)?;
        self.add(Pellet::new(position, &self.config.pellet, resources));
        Ok(())
    }

    fn shared<L: AssetLoader + ?Sized>(
        &mut self,
        kind: EntityKind,
        loader: &mut L,
    ) -> Result<ResourceSet, AssetError> {
        let descriptor = kind
            .descriptor()
            .ok_or_else(|| AssetError::NotFound(format!("{kind:?} has no render resources")))?;
        self.resources.ensure_loaded(kind, descriptor, loader)
    }

    /// Poll input, update, compact and render: one full frame
    pub fn tick<R: Renderer + ?Sized>(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut R,
        dt: f32,
    ) -> Result<(), GameError> {
        self.poll_input(input);
        self.update(dt, renderer)?;
        self.render(renderer)?;
        Ok(())
    }

    /// Refresh the key state from `source`
    pub fn poll_input(&mut self, source: &mut dyn InputSource) {
        source.poll(&mut self.input);
    }

    /// Replace the key state directly
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Run the update pass followed by compaction
    ///
    /// Spawned pellets load their shared resources through `loader` during
    /// compaction; a load failure aborts the tick.
    pub fn update<L: AssetLoader + ?Sized>(
        &mut self,
        dt: f32,
        loader: &mut L,
    ) -> Result<(), AssetError> {
        let count = self.entities.len();
        let mut keep = vec![true; count];

        for (index, alive) in keep.iter_mut().enumerate() {
            let (before, rest) = self.entities.split_at_mut(index);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            let mut ctx = TickContext {
                neighbors: Neighbors::new(before, after),
                input: &self.input,
                pellets: &mut self.pellets,
                spawns: &mut self.pending,
            };
            *alive = current.update(&mut ctx, dt);
        }

        self.ticks += 1;
        self.compact(&keep, loader)
    }

    fn compact<L: AssetLoader + ?Sized>(
        &mut self,
        keep: &[bool],
        loader: &mut L,
    ) -> Result<(), AssetError> {
        let before = self.entities.len();
        let mut flags = keep.iter();
        self.entities
            .retain(|entity| flags.next().copied().unwrap_or(true) && !entity.is_terminal());
        let removed = before - self.entities.len();

        let spawns = std::mem::take(&mut self.pending);
        for request in &spawns {
            match *request {
                SpawnRequest::Pellet { position } => {
                    let resources = self.shared(EntityKind::Pellet, loader)?;
                    self.entities
                        .push(Pellet::new(position, &self.config.pellet, resources).into());
                }
            }
        }

        if removed > 0 || !spawns.is_empty() {
            debug!(
                "Tick {}: removed {}, spawned {}, {} entities live",
                self.ticks,
                removed,
                spawns.len(),
                self.entities.len()
            );
        }
        self.check_pellet_count();
        Ok(())
    }

    fn check_pellet_count(&mut self) {
        let actual = self.count_live_pellets();
        debug_assert_eq!(self.pellets.count(), actual, "pellet counter out of sync");
        if self.pellets.count() != actual {
            warn!(
                "Pellet counter says {} but {} pellets are live, resyncing",
                self.pellets.count(),
                actual
            );
            self.pellets.reset(actual);
        }
    }

    /// Draw one frame: backgrounds first, then everything else in order
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), RenderError> {
        renderer.begin_frame()?;
        let (backgrounds, others): (Vec<&Entity>, Vec<&Entity>) = self
            .entities
            .iter()
            .filter(|entity| !entity.is_terminal())
            .partition(|entity| entity.kind() == EntityKind::Background);
        for entity in backgrounds.into_iter().chain(others) {
            entity.render(renderer, &self.camera);
        }
        renderer.end_frame()
    }

    /// Release every shared resource through `loader`
    pub fn teardown<L: AssetLoader + ?Sized>(&mut self, loader: &mut L) {
        self.resources.teardown(loader);
        info!("Scene torn down after {} ticks", self.ticks);
    }

    /// Entities in collection order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Live pellet counter
    pub const fn live_pellets(&self) -> usize {
        self.pellets.count()
    }

    /// Number of non-terminal pellets actually in the collection
    pub fn count_live_pellets(&self) -> usize {
        self.entities.iter().filter(|entity| entity.is_live_pellet()).count()
    }

    /// The first player in the scene
    pub fn player(&self) -> Option<&Player> {
        self.entities.iter().find_map(Entity::as_player)
    }

    /// Score of the first player, zero without one
    pub fn score(&self) -> u32 {
        self.player().map_or(0, Player::score)
    }

    /// Active camera
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Active camera, for viewport changes
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Shared resource registry
    pub const fn resources(&self) -> &ResourceRegistry<EntityKind> {
        &self.resources
    }

    /// Configuration the scene was built from
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Completed update passes
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}
