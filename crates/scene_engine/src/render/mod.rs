//! Rendering collaborator interface
//!
//! The engine treats graphics resources as opaque handles. A backend loads
//! them through [`AssetLoader`] and draws with them through [`Renderer`]:
//! entities `bind` their type's [`ResourceSet`] and issue a `draw` with their
//! [`Uniforms`]. Nothing in here knows about a concrete graphics API.

mod camera;
mod recording;

pub use camera::Camera;
pub use recording::{DrawRecord, RecordingRenderer};

use crate::assets::{AssetError, MeshData, TextureData};
use crate::foundation::collections::TypedHandle;
use crate::foundation::math::Mat4;

/// Opaque handle to a loaded mesh
pub type MeshHandle = TypedHandle<MeshData>;

/// Opaque handle to a loaded texture
pub type TextureHandle = TypedHandle<TextureData>;

/// Opaque handle to a compiled shader program
pub type ShaderHandle = TypedHandle<ShaderProgram>;

/// Shader programs known at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderProgram {
    /// Lit object shader, consumes the camera's view and projection
    Object,
    /// Screen-space backdrop shader: ignores the camera, honours `offset`
    Space,
}

/// The resource triple an entity type renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceSet {
    /// Mesh geometry
    pub mesh: MeshHandle,
    /// Shader program
    pub shader: ShaderHandle,
    /// Surface texture
    pub texture: TextureHandle,
}

/// Per-draw uniform block
#[derive(Debug, Clone, PartialEq)]
pub struct Uniforms {
    /// Model (object → world) matrix
    pub model: Mat4,
    /// View (world → camera) matrix
    pub view: Mat4,
    /// Projection (camera → clip) matrix
    pub projection: Mat4,
    /// Texture-space scroll offset (backdrops)
    pub offset: f32,
}

impl Uniforms {
    /// Uniforms for an object drawn through `camera`
    pub fn with_camera(model: Mat4, camera: &Camera) -> Self {
        Self {
            model,
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            offset: 0.0,
        }
    }

    /// Uniforms for geometry already expressed in normalised device coordinates
    pub fn screen_space(model: Mat4, offset: f32) -> Self {
        Self {
            model,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            offset,
        }
    }

    /// Combined model-view-projection matrix
    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// Loads renderable resources and hands back opaque handles
pub trait AssetLoader {
    /// Load (or look up) a mesh by its asset identifier
    fn load_mesh(&mut self, name: &str) -> Result<MeshHandle, AssetError>;

    /// Compile (or look up) a shader program
    fn load_shader(&mut self, program: ShaderProgram) -> Result<ShaderHandle, AssetError>;

    /// Load (or look up) a texture by its asset identifier
    fn load_texture(&mut self, name: &str) -> Result<TextureHandle, AssetError>;

    /// Release a previously loaded resource triple
    fn release(&mut self, resources: &ResourceSet);
}

/// Rendering collaborator: bind/use resources, then draw
pub trait Renderer: AssetLoader {
    /// Start a new frame
    fn begin_frame(&mut self) -> Result<(), RenderError>;

    /// Make `resources` current for the following draw calls
    fn bind(&mut self, resources: &ResourceSet);

    /// Draw the currently bound mesh with `uniforms`
    fn draw(&mut self, uniforms: &Uniforms);

    /// Finish and present the frame
    fn end_frame(&mut self) -> Result<(), RenderError>;
}

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Output device failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure
    #[error("Render backend error: {0}")]
    Backend(String),
}
