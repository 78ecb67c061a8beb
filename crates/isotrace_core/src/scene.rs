//! The renderable scene: mesh, texture and the KD-tree over the mesh.
//!
//! A `Scene` is assembled once and never mutated afterwards, so it can be
//! shared by reference across render threads.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;

use crate::kdtree::KdTree;
use crate::mesh::Mesh;
use crate::obj::{parse_obj, ParseError};
use crate::texture::{Texture, TextureError};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to open mesh {path}: {source}")]
    MeshIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Mesh error: {0}")]
    Parse(#[from] ParseError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),
}

/// Result type for loading operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A textured mesh ready for ray casting.
#[derive(Debug)]
pub struct Scene {
    mesh: Mesh,
    texture: Texture,
    index: KdTree,
}

impl Scene {
    /// Assemble a scene, building the KD-tree over the mesh.
    pub fn new(mesh: Mesh, texture: Texture) -> Self {
        let index = KdTree::build(mesh.triangles());
        Self {
            mesh,
            texture,
            index,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Spatial index over `mesh().triangles()`.
    pub fn index(&self) -> &KdTree {
        &self.index
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}

/// Load a texture file and an OBJ mesh file into a scene.
///
/// # Example
///
/// ```ignore
/// use isotrace_core::load_scene;
///
/// let scene = load_scene("bnuuy.png", "bnuuy.obj")?;
/// println!("Loaded {} triangles", scene.triangle_count());
/// ```
pub fn load_scene(
    texture_path: impl AsRef<Path>,
    mesh_path: impl AsRef<Path>,
) -> SceneResult<Scene> {
    let texture = Texture::load(texture_path)?;

    let mesh_path = mesh_path.as_ref();
    let file = File::open(mesh_path).map_err(|source| SceneError::MeshIo {
        path: mesh_path.display().to_string(),
        source,
    })?;
    let mesh = parse_obj(BufReader::new(file))?;

    log::info!(
        "Loaded {} triangles from {} with {}x{} texture {}",
        mesh.triangle_count(),
        mesh_path.display(),
        texture.width,
        texture.height,
        texture.source
    );

    Ok(Scene::new(mesh, texture))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::parse_obj_str;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::io::Write;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn red_texture() -> Texture {
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        Texture::from_image(DynamicImage::ImageRgba8(img), "red")
    }

    #[test]
    fn test_scene_new_indexes_every_triangle() {
        let mesh = parse_obj_str(TRIANGLE).unwrap();
        let scene = Scene::new(mesh, red_texture());

        assert_eq!(scene.triangle_count(), 1);
        assert_eq!(scene.mesh().triangles().len(), scene.mesh().uvs().len());
        assert_eq!(scene.index().stats().leaf_entries, 1);
    }

    #[test]
    fn test_load_scene_from_files() {
        init_logging();
        let dir = std::env::temp_dir().join(format!("isotrace_scene_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let tex_path = dir.join("tex.png");
        RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255]))
            .save(&tex_path)
            .unwrap();
        let obj_path = dir.join("mesh.obj");
        File::create(&obj_path)
            .unwrap()
            .write_all(TRIANGLE.as_bytes())
            .unwrap();

        let scene = load_scene(&tex_path, &obj_path).unwrap();
        assert_eq!(scene.triangle_count(), 1);
        assert_eq!((scene.texture().width, scene.texture().height), (2, 2));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_mesh_file() {
        let dir = std::env::temp_dir().join(format!("isotrace_nomesh_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let tex_path = dir.join("tex.png");
        RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))
            .save(&tex_path)
            .unwrap();

        let result = load_scene(&tex_path, dir.join("missing.obj"));
        assert!(matches!(result, Err(SceneError::MeshIo { .. })));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_parse_error_propagates() {
        let dir = std::env::temp_dir().join(format!("isotrace_badmesh_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let tex_path = dir.join("tex.png");
        RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))
            .save(&tex_path)
            .unwrap();
        let obj_path = dir.join("bad.obj");
        std::fs::write(&obj_path, "o object\n").unwrap();

        let result = load_scene(&tex_path, &obj_path);
        assert!(matches!(
            result,
            Err(SceneError::Parse(ParseError::UnsupportedCommand { .. }))
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}
