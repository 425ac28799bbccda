//! Game configuration
//!
//! Every section has defaults matching the shipped game, so a config file only
//! needs the values it changes. Files are TOML or RON, picked by extension.

use std::path::PathBuf;

use rand::Rng;
use scene_engine::config::{Config, ConfigError, Deserialize, Serialize};
use scene_engine::foundation::math::Vec3;
use scene_engine::render::Camera;

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rectangle the player may move in
    pub play_area: PlayArea,

    /// Player settings
    pub player: PlayerConfig,

    /// Pellet settings
    pub pellet: PelletConfig,

    /// Spawner settings
    pub spawner: SpawnerConfig,

    /// Static walls placed at startup
    pub walls: Vec<WallConfig>,

    /// Backdrop settings
    pub background: BackgroundConfig,

    /// Camera placement
    pub camera: CameraConfig,

    /// Asset locations
    pub assets: AssetsConfig,

    /// Frame loop settings
    pub runtime: RuntimeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            play_area: PlayArea::default(),
            player: PlayerConfig::default(),
            pellet: PelletConfig::default(),
            spawner: SpawnerConfig::default(),
            walls: vec![
                WallConfig::at(Vec3::new(-4.0, 2.0, 0.0)),
                WallConfig::at(Vec3::new(4.0, 2.0, 0.0)),
            ],
            background: BackgroundConfig::default(),
            camera: CameraConfig::default(),
            assets: AssetsConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.play_area.validate("play_area")?;
        self.spawner.region.validate("spawner.region")?;

        if self.player.speed <= 0.0 {
            return Err(invalid("player.speed must be positive"));
        }
        if self.player.radius_factor < 0.0 || self.player.scale.iter().any(|s| *s <= 0.0) {
            return Err(invalid("player.radius_factor must not be negative and player.scale must be positive"));
        }
        if self.pellet.scale <= 0.0 {
            return Err(invalid("pellet.scale must be positive"));
        }
        if self.spawner.interval <= 0.0 {
            return Err(invalid("spawner.interval must be positive"));
        }
        if self.spawner.population_cap == 0 {
            return Err(invalid("spawner.population_cap must be at least 1"));
        }
        if let Some(wall) = self
            .walls
            .iter()
            .find(|wall| wall.radius_factor < 0.0 || wall.scale.iter().any(|s| *s <= 0.0))
        {
            return Err(invalid(&format!(
                "wall at {:?} needs a non-negative radius factor and a positive scale",
                wall.position
            )));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(invalid("camera clip planes must satisfy 0 < near < far"));
        }
        if self.runtime.target_fps == 0 || self.runtime.max_dt <= 0.0 {
            return Err(invalid("runtime.target_fps and runtime.max_dt must be positive"));
        }
        if !self.runtime.key_hold.is_finite() || self.runtime.key_hold < 0.0 {
            return Err(invalid("runtime.key_hold must be a non-negative number of seconds"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid(reason.to_string())
}

/// Axis-aligned rectangle in the XY plane (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    /// Smallest allowed x
    pub min_x: f32,
    /// Largest allowed x
    pub max_x: f32,
    /// Smallest allowed y
    pub min_y: f32,
    /// Largest allowed y
    pub max_y: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            min_x: -7.5,
            max_x: 7.5,
            min_y: -5.0,
            max_y: 7.5,
        }
    }
}

impl PlayArea {
    /// Whether `position` lies inside the rectangle (z is ignored)
    pub fn contains(&self, position: &Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&position.x)
            && (self.min_y..=self.max_y).contains(&position.y)
    }

    /// Uniformly random point inside the rectangle at z = 0
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec3 {
        Vec3::new(
            rng.gen_range(self.min_x..=self.max_x),
            rng.gen_range(self.min_y..=self.max_y),
            0.0,
        )
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        let finite = [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.min_x > self.max_x || self.min_y > self.max_y {
            return Err(invalid(&format!(
                "{section} must be finite with min <= max on both axes"
            )));
        }
        Ok(())
    }
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Movement speed in units per second
    pub speed: f32,
    /// Collision radius = factor × scale.y
    pub radius_factor: f32,
    /// Spawn position
    pub start_position: Vec3,
    /// Model scale
    pub scale: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            radius_factor: 0.9135,
            start_position: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Pellet settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PelletConfig {
    /// Uniform model scale; the collision radius equals it
    pub scale: f32,
}

impl Default for PelletConfig {
    fn default() -> Self {
        Self { scale: 0.3 }
    }
}

/// Spawner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds that must strictly elapse between spawns
    pub interval: f32,
    /// Maximum number of live pellets
    pub population_cap: usize,
    /// Rectangle new pellets appear in
    pub region: PlayArea,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval: 0.01,
            population_cap: 10,
            region: PlayArea::default(),
            seed: None,
        }
    }
}

/// One wall placed at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Wall center
    pub position: Vec3,
    /// Model scale
    pub scale: Vec3,
    /// Collision radius = factor × scale.x
    pub radius_factor: f32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            radius_factor: 1.0,
        }
    }
}

impl WallConfig {
    /// Unit wall at `position`
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// Backdrop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Texture scroll speed in texture widths per second (0 = static)
    pub scroll_speed: f32,
}

/// Camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub position: Vec3,
    /// Look-at target
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.25, -16.0),
            target: Vec3::new(0.0, 1.25, 0.0),
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    /// Build the camera for a viewport with the given aspect ratio
    pub fn build(&self, aspect: f32) -> Camera {
        let mut camera =
            Camera::perspective(self.position, self.fov_degrees, aspect, self.near, self.far);
        camera.look_at(self.target);
        camera
    }
}

/// Asset locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Root directory holding `models/` and `textures/`
    pub directory: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"),
        }
    }
}

/// Frame loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Frames per second the loop aims for
    pub target_fps: u32,
    /// Upper clamp on a single tick's `dt`, in seconds
    pub max_dt: f32,
    /// How long a key counts as held after its last press event, in seconds
    pub key_hold: f32,
    /// File the log is written to while the terminal is in use
    pub log_file: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_dt: 0.1,
            key_hold: 0.15,
            log_file: PathBuf::from("pellet_chase.log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.walls.len(), 2);
        assert_eq!(config.spawner.population_cap, 10);
    }

    #[test]
    fn test_inverted_play_area_is_rejected() {
        let mut config = GameConfig::default();
        config.play_area.min_x = 10.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let mut config = GameConfig::default();
        config.spawner.population_cap = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_random_points_stay_inside() {
        let area = PlayArea::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(area.contains(&area.random_point(&mut rng)));
        }
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(
            &path,
            "[player]\nspeed = 4.0\n\n[spawner]\npopulation_cap = 3\nseed = 42\n",
        )
        .unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.player.speed, 4.0);
        assert_eq!(config.player.radius_factor, 0.9135);
        assert_eq!(config.spawner.population_cap, 3);
        assert_eq!(config.spawner.seed, Some(42));
        assert_eq!(config.play_area, PlayArea::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ron");
        let mut config = GameConfig::default();
        config.background.scroll_speed = 0.2;
        config.save_to_file(&path).unwrap();
        assert_eq!(GameConfig::load_from_file(&path).unwrap(), config);
    }
}
