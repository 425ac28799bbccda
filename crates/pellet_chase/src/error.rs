//! Game error types

use scene_engine::assets::AssetError;
use scene_engine::config::ConfigError;
use scene_engine::render::RenderError;
use thiserror::Error;

/// Errors that can stop the game
#[derive(Debug, Error)]
pub enum GameError {
    /// A shared resource could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The render backend failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Terminal or filesystem failure outside the renderer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for game operations
pub type GameResult<T> = Result<T, GameError>;
