//! Per-kind shared resource registry
//!
//! Every entity kind renders with exactly one (mesh, shader, texture) triple.
//! The registry loads that triple the first time an instance of the kind is
//! created and hands the cached handles to every later instance. Handles stay
//! valid until [`ResourceRegistry::teardown`] releases them at shutdown.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::AssetError;
use crate::render::{AssetLoader, ResourceSet, ShaderProgram};

/// Compile-time asset identifiers for one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Mesh asset identifier
    pub mesh: &'static str,
    /// Shader program
    pub shader: ShaderProgram,
    /// Texture asset identifier
    pub texture: &'static str,
}

/// Lazily-initialised map from entity kind to its resource triple
#[derive(Debug)]
pub struct ResourceRegistry<K> {
    entries: HashMap<K, ResourceSet>,
    loads: usize,
}

impl<K> Default for ResourceRegistry<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            loads: 0,
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> ResourceRegistry<K> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the triple for `kind`, loading it through `loader` on first use
    ///
    /// Idempotent: once a kind is cached, further calls never touch the
    /// loader. When any of the three loads fails nothing is cached and the
    /// error is returned to the caller.
    pub fn ensure_loaded<L: AssetLoader + ?Sized>(
        &mut self,
        kind: K,
        descriptor: &ResourceDescriptor,
        loader: &mut L,
    ) -> Result<ResourceSet, AssetError> {
        if let Some(resources) = self.entries.get(&kind) {
            return Ok(*resources);
        }

        let resources = Self::load(descriptor, loader)?;
        log::info!(
            "Loaded shared resources for {:?} (mesh {}, shader {:?}, texture {})",
            kind,
            descriptor.mesh,
            descriptor.shader,
            descriptor.texture
        );
        self.entries.insert(kind, resources);
        self.loads += 1;
        Ok(resources)
    }

    fn load<L: AssetLoader + ?Sized>(
        descriptor: &ResourceDescriptor,
        loader: &mut L,
    ) -> Result<ResourceSet, AssetError> {
        let shader = loader.load_shader(descriptor.shader)?;
        let texture = loader.load_texture(descriptor.texture)?;
        let mesh = loader.load_mesh(descriptor.mesh)?;
        Ok(ResourceSet {
            mesh,
            shader,
            texture,
        })
    }

    /// Cached triple for `kind`, if it has been loaded
    pub fn get(&self, kind: K) -> Option<&ResourceSet> {
        self.entries.get(&kind)
    }

    /// Whether `kind` has been loaded
    pub fn is_loaded(&self, kind: K) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Number of kinds loaded over the registry's lifetime
    pub fn load_count(&self) -> usize {
        self.loads
    }

    /// Release every cached triple through `loader`
    ///
    /// Called once at shutdown, before the loader itself is dropped.
    pub fn teardown<L: AssetLoader + ?Sized>(&mut self, loader: &mut L) {
        for (kind, resources) in self.entries.drain() {
            log::debug!("Releasing shared resources for {:?}", kind);
            loader.release(&resources);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Rock,
        Ship,
    }

    const ROCK: ResourceDescriptor = ResourceDescriptor {
        mesh: "rock.obj",
        shader: ShaderProgram::Object,
        texture: "rock.png",
    };

    const SHIP: ResourceDescriptor = ResourceDescriptor {
        mesh: "ship.obj",
        shader: ShaderProgram::Object,
        texture: "ship.png",
    };

    #[test]
    fn test_second_call_reuses_cached_triple() {
        let mut renderer = RecordingRenderer::new();
        let mut registry = ResourceRegistry::new();

        let first = registry.ensure_loaded(Kind::Rock, &ROCK, &mut renderer).unwrap();
        let requests = renderer.load_requests().len();
        let second = registry.ensure_loaded(Kind::Rock, &ROCK, &mut renderer).unwrap();

        assert_eq!(first, second);
        assert_eq!(renderer.load_requests().len(), requests);
        assert_eq!(registry.load_count(), 1);
    }

    #[test]
    fn test_kinds_get_distinct_triples() {
        let mut renderer = RecordingRenderer::new();
        let mut registry = ResourceRegistry::new();

        let rock = registry.ensure_loaded(Kind::Rock, &ROCK, &mut renderer).unwrap();
        let ship = registry.ensure_loaded(Kind::Ship, &SHIP, &mut renderer).unwrap();

        assert_ne!(rock.mesh, ship.mesh);
        assert_eq!(renderer.mesh_name(ship.mesh), Some("ship.obj"));
        assert_eq!(registry.load_count(), 2);
    }

    #[test]
    fn test_failed_load_caches_nothing() {
        let mut renderer = RecordingRenderer::new().with_missing_asset("rock.obj");
        let mut registry = ResourceRegistry::new();

        let result = registry.ensure_loaded(Kind::Rock, &ROCK, &mut renderer);
        assert!(matches!(result, Err(AssetError::NotFound(_))));
        assert!(!registry.is_loaded(Kind::Rock));
        assert_eq!(registry.load_count(), 0);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut renderer = RecordingRenderer::new();
        let mut registry = ResourceRegistry::new();
        registry.ensure_loaded(Kind::Rock, &ROCK, &mut renderer).unwrap();
        registry.ensure_loaded(Kind::Ship, &SHIP, &mut renderer).unwrap();

        registry.teardown(&mut renderer);
        assert_eq!(renderer.live_resources(), 0);
        assert!(registry.get(Kind::Rock).is_none());
    }
}
