//! # Scene Engine
//!
//! Small engine layer for scene-based real-time games: a world of heterogeneous
//! entities is updated once per tick, entities interact through simple bounding
//! volumes, and every entity type renders with a resource triple (mesh, shader,
//! texture) that is loaded once and shared by all of its instances.
//!
//! ## Layout
//!
//! - [`foundation`]: math aliases, transforms, timing, handle collections, logging
//! - [`config`]: file-backed configuration (TOML or RON)
//! - [`input`]: key state polled once per tick
//! - [`render`]: camera, opaque GPU-style handles and the renderer collaborator
//! - [`assets`]: asset errors, disk loaders and the per-kind resource registry
//! - [`physics`]: bounding-sphere overlap tests
//!
//! The engine never talks to a graphics API directly. Games plug in a backend
//! through the [`render::Renderer`] trait; [`render::RecordingRenderer`] is a
//! headless backend used for tests and tooling.
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Crate }
//!
//! const CRATE: ResourceDescriptor = ResourceDescriptor {
//!     mesh: "cube.obj",
//!     shader: ShaderProgram::Object,
//!     texture: "white.png",
//! };
//!
//! let mut renderer = RecordingRenderer::new();
//! let mut registry = ResourceRegistry::new();
//! let first = registry.ensure_loaded(Kind::Crate, &CRATE, &mut renderer).unwrap();
//! let second = registry.ensure_loaded(Kind::Crate, &CRATE, &mut renderer).unwrap();
//! assert_eq!(first, second);
//! assert_eq!(registry.load_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod render;
pub mod assets;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ResourceDescriptor, ResourceRegistry},
        config::{Config, ConfigError},
        foundation::{
            math::{Mat4, Point3, Transform, Vec3},
            time::Timer,
        },
        input::{InputSource, InputState, KeyCode},
        physics::BoundingSphere,
        render::{
            AssetLoader, Camera, RecordingRenderer, RenderError, Renderer, ResourceSet,
            ShaderProgram, Uniforms,
        },
    };
}
