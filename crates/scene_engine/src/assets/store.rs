//! Disk-backed asset storage
//!
//! Resolves asset identifiers against a root directory laid out as
//! `<root>/models/<mesh>` and `<root>/textures/<texture>`, keeps the decoded
//! data in handle maps and deduplicates repeated loads of the same file.
//! Concrete renderers embed a store and forward their [`AssetLoader`] calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{load_obj_mesh, load_texture, AssetError, MeshData, TextureData};
use crate::foundation::collections::{insert_typed, HandleMap};
use crate::render::{
    AssetLoader, MeshHandle, ResourceSet, ShaderHandle, ShaderProgram, TextureHandle,
};

/// Asset storage rooted at a directory
#[derive(Debug)]
pub struct FileAssetStore {
    root: PathBuf,
    meshes: HandleMap<MeshData>,
    textures: HandleMap<TextureData>,
    shaders: HandleMap<ShaderProgram>,
    mesh_names: HashMap<String, MeshHandle>,
    texture_names: HashMap<String, TextureHandle>,
}

impl FileAssetStore {
    /// Create a store reading from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            meshes: HandleMap::new(),
            textures: HandleMap::new(),
            shaders: HandleMap::new(),
            mesh_names: HashMap::new(),
            texture_names: HashMap::new(),
        }
    }

    /// Asset root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decoded mesh behind a handle
    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.key())
    }

    /// Decoded texture behind a handle
    pub fn texture(&self, handle: TextureHandle) -> Option<&TextureData> {
        self.textures.get(handle.key())
    }

    /// Shader program behind a handle
    pub fn shader(&self, handle: ShaderHandle) -> Option<ShaderProgram> {
        self.shaders.get(handle.key()).copied()
    }
}

impl AssetLoader for FileAssetStore {
    fn load_mesh(&mut self, name: &str) -> Result<MeshHandle, AssetError> {
        if let Some(handle) = self.mesh_names.get(name) {
            return Ok(*handle);
        }
        let mesh = load_obj_mesh(&self.root.join("models").join(name))?;
        let handle = insert_typed(&mut self.meshes, mesh);
        self.mesh_names.insert(name.to_string(), handle);
        Ok(handle)
    }

    fn load_shader(&mut self, program: ShaderProgram) -> Result<ShaderHandle, AssetError> {
        let existing = self
            .shaders
            .iter()
            .find_map(|(key, loaded)| (*loaded == program).then_some(key));
        Ok(match existing {
            Some(key) => ShaderHandle::new(key),
            None => insert_typed(&mut self.shaders, program),
        })
    }

    fn load_texture(&mut self, name: &str) -> Result<TextureHandle, AssetError> {
        if let Some(handle) = self.texture_names.get(name) {
            return Ok(*handle);
        }
        let texture = load_texture(&self.root.join("textures").join(name))?;
        let handle = insert_typed(&mut self.textures, texture);
        self.texture_names.insert(name.to_string(), handle);
        Ok(handle)
    }

    fn release(&mut self, resources: &ResourceSet) {
        self.meshes.remove(resources.mesh.key());
        self.textures.remove(resources.texture.key());
        self.shaders.remove(resources.shader.key());
        self.mesh_names.retain(|_, handle| *handle != resources.mesh);
        self.texture_names.retain(|_, handle| *handle != resources.texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_assets() -> (tempfile::TempDir, FileAssetStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("models")).unwrap();
        std::fs::create_dir_all(dir.path().join("textures")).unwrap();
        std::fs::write(
            dir.path().join("models/tri.obj"),
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();
        image::RgbImage::from_pixel(2, 2, image::Rgb([255, 0, 0]))
            .save(dir.path().join("textures/red.png"))
            .unwrap();
        let store = FileAssetStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_repeated_loads_share_a_handle() {
        let (_dir, mut store) = store_with_assets();
        let a = store.load_mesh("tri.obj").unwrap();
        let b = store.load_mesh("tri.obj").unwrap();
        assert_eq!(a, b);

        let s1 = store.load_shader(ShaderProgram::Object).unwrap();
        let s2 = store.load_shader(ShaderProgram::Object).unwrap();
        let s3 = store.load_shader(ShaderProgram::Space).unwrap();
        assert_eq!(s1, s2);
        assert_ne!(s1, s3);
    }

    #[test]
    fn test_loaded_data_is_reachable() {
        let (_dir, mut store) = store_with_assets();
        let texture = store.load_texture("red.png").unwrap();
        assert_eq!(store.texture(texture).unwrap().mean_color(), [255, 0, 0]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (_dir, mut store) = store_with_assets();
        assert!(matches!(
            store.load_texture("absent.png"),
            Err(AssetError::NotFound(_))
        ));
    }
}
