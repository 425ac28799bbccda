//! Disk loaders for meshes and textures

use std::path::Path;

use super::{AssetError, MeshData, TextureData};
use crate::foundation::math::Point3;

/// Load a Wavefront OBJ file, merging every model into one triangle list
pub fn load_obj_mesh(path: &Path) -> Result<MeshData, AssetError> {
    let name = path.display().to_string();
    if !path.exists() {
        return Err(AssetError::NotFound(name));
    }

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| AssetError::Mesh {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    let mut mesh = MeshData {
        positions: Vec::new(),
        indices: Vec::new(),
    };
    for model in models {
        let base = u32::try_from(mesh.positions.len()).map_err(|_| AssetError::Mesh {
            name: name.clone(),
            reason: "too many vertices".to_string(),
        })?;
        mesh.positions.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Point3::new(p[0], p[1], p[2])),
        );
        mesh.indices
            .extend(model.mesh.indices.iter().map(|index| base + index));
    }

    if mesh.indices.is_empty() {
        return Err(AssetError::Empty(name));
    }
    log::debug!(
        "Loaded mesh {} ({} vertices, {} triangles)",
        name,
        mesh.positions.len(),
        mesh.indices.len() / 3
    );
    Ok(mesh)
}

/// Load an image file as an RGB texture
pub fn load_texture(path: &Path) -> Result<TextureData, AssetError> {
    let name = path.display().to_string();
    if !path.exists() {
        return Err(AssetError::NotFound(name));
    }

    let image = image::open(path)
        .map_err(|e| AssetError::Texture {
            name: name.clone(),
            reason: e.to_string(),
        })?
        .to_rgb8();

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty(name));
    }
    let pixels = image.pixels().map(|pixel| pixel.0).collect();
    log::debug!("Loaded texture {} ({}x{})", name, width, height);
    Ok(TextureData {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\nf 2 4 3\n";

    #[test]
    fn test_load_obj_triangles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        std::fs::write(&path, TRIANGLE_OBJ).unwrap();

        let mesh = load_obj_mesh(&path).unwrap();
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.triangles().count(), 2);
    }

    #[test]
    fn test_missing_obj_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_obj_mesh(&dir.path().join("nope.obj"));
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex.png");
        let image = image::RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]));
        image.save(&path).unwrap();

        let texture = load_texture(&path).unwrap();
        assert_eq!((texture.width, texture.height), (4, 2));
        assert_eq!(texture.mean_color(), [10, 20, 30]);
    }

    #[test]
    fn test_garbage_texture_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(load_texture(&path), Err(AssetError::Texture { .. })));
    }
}
