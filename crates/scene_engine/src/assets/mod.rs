//! Asset management system
//!
//! - [`ResourceRegistry`]: one resource triple per entity kind, loaded on first
//!   use and shared by every instance of that kind
//! - [`FileAssetStore`]: disk-backed storage for meshes (Wavefront OBJ) and
//!   textures (PNG) that concrete renderers build on
//! - [`load_obj_mesh`] / [`load_texture`]: the raw loaders

mod loaders;
mod registry;
mod store;

pub use loaders::{load_obj_mesh, load_texture};
pub use registry::{ResourceDescriptor, ResourceRegistry};
pub use store::FileAssetStore;

use thiserror::Error;

use crate::foundation::math::Point3;

/// CPU-side mesh: triangle list over indexed positions
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Vertex positions in object space
    pub positions: Vec<Point3>,
    /// Triangle indices, three per face
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Iterate over triangles as position triples
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|face| {
            let a = *self.positions.get(face[0] as usize)?;
            let b = *self.positions.get(face[1] as usize)?;
            let c = *self.positions.get(face[2] as usize)?;
            Some([a, b, c])
        })
    }
}

/// CPU-side texture summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RGB pixels, row-major
    pub pixels: Vec<[u8; 3]>,
}

impl TextureData {
    /// Average colour over every pixel
    pub fn mean_color(&self) -> [u8; 3] {
        if self.pixels.is_empty() {
            return [255, 255, 255];
        }
        let mut sum = [0u64; 3];
        for pixel in &self.pixels {
            for (total, channel) in sum.iter_mut().zip(pixel) {
                *total += u64::from(*channel);
            }
        }
        let count = self.pixels.len() as u64;
        sum.map(|total| u8::try_from(total / count).unwrap_or(u8::MAX))
    }

    /// Nearest-neighbour sample with wrapping texture coordinates
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn sample(&self, u: f32, v: f32) -> [u8; 3] {
        if self.width == 0 || self.height == 0 {
            return [255, 255, 255];
        }
        let x = (u.rem_euclid(1.0) * self.width as f32) as u32 % self.width;
        let y = (v.rem_euclid(1.0) * self.height as f32) as u32 % self.height;
        self.pixels
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or([255, 255, 255])
    }
}

/// Asset loading errors
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset identifier did not resolve to a file
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Mesh file could not be parsed
    #[error("Failed to load mesh {name}: {reason}")]
    Mesh {
        /// Asset identifier
        name: String,
        /// Loader message
        reason: String,
    },

    /// Texture file could not be decoded
    #[error("Failed to load texture {name}: {reason}")]
    Texture {
        /// Asset identifier
        name: String,
        /// Decoder message
        reason: String,
    },

    /// Asset parsed but holds no usable data
    #[error("Asset is empty: {0}")]
    Empty(String),
}
