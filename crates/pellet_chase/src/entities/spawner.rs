//! Time-driven pellet factory

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_engine::foundation::math::Transform;

use super::{SpawnRequest, TickContext};
use crate::config::{PlayArea, SpawnerConfig};

/// Where the spawner is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerState {
    /// Waiting for the interval to elapse or for room under the cap
    Accumulating,
    /// The next update will spawn a pellet
    AboutToSpawn,
}

/// Invisible entity that adds pellets at a bounded rate and population
#[derive(Debug, Clone)]
pub struct Spawner {
    transform: Transform,
    rng: StdRng,
    region: PlayArea,
    interval: f32,
    cap: usize,
    elapsed: f32,
}

impl Spawner {
    /// Create a spawner; seeded when the config carries a seed
    pub fn new(config: &SpawnerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            transform: Transform::identity(),
            rng,
            region: config.region,
            interval: config.interval,
            cap: config.population_cap,
            elapsed: 0.0,
        }
    }

    /// Spatial state (unused, the spawner is never drawn)
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Seconds accumulated since the last spawn
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Maximum live pellet population
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Cycle state given the current live pellet count
    pub fn state(&self, live: usize) -> SpawnerState {
        if self.elapsed > self.interval && live < self.cap {
            SpawnerState::AboutToSpawn
        } else {
            SpawnerState::Accumulating
        }
    }

    /// Accumulate `dt` and queue one pellet when due. Never terminates.
    pub fn update(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> bool {
        self.elapsed += dt;
        if self.state(ctx.pellets.count()) == SpawnerState::AboutToSpawn {
            let position = self.region.random_point(&mut self.rng);
            ctx.spawns.push(SpawnRequest::Pellet { position });
            ctx.pellets.increment();
            self.elapsed = 0.0;
            debug!("Queued pellet at {:?} ({} live)", position, ctx.pellets.count());
        }
        true
    }
}
