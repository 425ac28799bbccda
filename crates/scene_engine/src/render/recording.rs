//! Headless renderer that records bind/draw traffic
//!
//! No device, no files: meshes and textures are "loaded" by name, and every
//! draw is captured as a [`DrawRecord`]. Assets can be declared missing to
//! drive the fail-fast load path.

use std::collections::HashSet;

use super::{
    AssetLoader, MeshHandle, RenderError, Renderer, ResourceSet, ShaderHandle, ShaderProgram,
    TextureHandle, Uniforms,
};
use crate::assets::AssetError;
use crate::foundation::collections::{HandleMap, TypedHandle};

/// One captured draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    /// Resources bound when the draw was issued
    pub resources: ResourceSet,
    /// Uniforms passed to the draw
    pub uniforms: Uniforms,
}

/// Headless [`Renderer`] for tests and tooling
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    meshes: HandleMap<String>,
    textures: HandleMap<String>,
    shaders: HandleMap<ShaderProgram>,
    missing: HashSet<String>,
    load_requests: Vec<String>,
    bound: Option<ResourceSet>,
    current_frame: Vec<DrawRecord>,
    last_frame: Vec<DrawRecord>,
    frames_presented: u64,
}

impl RecordingRenderer {
    /// Create a renderer where every asset exists
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an asset identifier as missing; loading it fails with `NotFound`
    #[must_use]
    pub fn with_missing_asset(mut self, name: &str) -> Self {
        self.missing.insert(name.to_string());
        self
    }

    /// Every load request received, in order (meshes and textures by name,
    /// shaders by program)
    pub fn load_requests(&self) -> &[String] {
        &self.load_requests
    }

    /// Draw calls of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawRecord] {
        &self.last_frame
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Name of a loaded mesh
    pub fn mesh_name(&self, handle: MeshHandle) -> Option<&str> {
        self.meshes.get(handle.key()).map(String::as_str)
    }

    /// Name of a loaded texture
    pub fn texture_name(&self, handle: TextureHandle) -> Option<&str> {
        self.textures.get(handle.key()).map(String::as_str)
    }

    /// Number of resources currently alive (meshes + textures + shaders)
    pub fn live_resources(&self) -> usize {
        self.meshes.len() + self.textures.len() + self.shaders.len()
    }

    fn check_present(&self, name: &str) -> Result<(), AssetError> {
        if self.missing.contains(name) {
            Err(AssetError::NotFound(name.to_string()))
        } else {
            Ok(())
        }
    }
}

impl AssetLoader for RecordingRenderer {
    fn load_mesh(&mut self, name: &str) -> Result<MeshHandle, AssetError> {
        self.load_requests.push(name.to_string());
        self.check_present(name)?;
        Ok(TypedHandle::new(self.meshes.insert(name.to_string())))
    }

    fn load_shader(&mut self, program: ShaderProgram) -> Result<ShaderHandle, AssetError> {
        self.load_requests.push(format!("{program:?}"));
        Ok(TypedHandle::new(self.shaders.insert(program)))
    }

    fn load_texture(&mut self, name: &str) -> Result<TextureHandle, AssetError> {
        self.load_requests.push(name.to_string());
        self.check_present(name)?;
        Ok(TypedHandle::new(self.textures.insert(name.to_string())))
    }

    fn release(&mut self, resources: &ResourceSet) {
        self.meshes.remove(resources.mesh.key());
        self.textures.remove(resources.texture.key());
        self.shaders.remove(resources.shader.key());
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        self.current_frame.clear();
        self.bound = None;
        Ok(())
    }

    fn bind(&mut self, resources: &ResourceSet) {
        self.bound = Some(*resources);
    }

    fn draw(&mut self, uniforms: &Uniforms) {
        match self.bound {
            Some(resources) => self.current_frame.push(DrawRecord {
                resources,
                uniforms: uniforms.clone(),
            }),
            None => log::warn!("draw issued with nothing bound, ignoring"),
        }
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        self.last_frame = std::mem::take(&mut self.current_frame);
        self.frames_presented += 1;
        Ok(())
    }
}
