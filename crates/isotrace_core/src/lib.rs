//! isotrace core - scene types and loading.
//!
//! This crate provides:
//!
//! - **Geometry**: `Mesh`, `Triangle`, `UvTriangle`
//! - **Textures**: `Texture` decoding and nearest-texel sampling
//! - **OBJ parsing**: the triangulated `v`/`vt`/`f` subset
//! - **Spatial index**: `KdTree` over mesh triangles
//! - **Scene**: the immutable bundle handed to the renderer
//!
//! # Example
//!
//! ```ignore
//! use isotrace_core::load_scene;
//!
//! let scene = load_scene("bnuuy.png", "bnuuy.obj")?;
//! println!("Loaded {} triangles", scene.triangle_count());
//! ```

pub mod kdtree;
pub mod mesh;
pub mod obj;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use kdtree::{KdTree, KdTreeStats, LEAF_MAX_SIZE};
pub use mesh::{Mesh, Triangle, UvTriangle};
pub use obj::{parse_obj, parse_obj_str, ParseError, ParseResult};
pub use scene::{load_scene, Scene, SceneError, SceneResult};
pub use texture::{StraightRgba, Texture, TextureError, TextureResult};
