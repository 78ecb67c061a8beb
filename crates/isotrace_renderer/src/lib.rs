//! isotrace renderer - textured mesh ray casting.
//!
//! Casts one parallel ray per pixel through a [`Scene`](isotrace_core::Scene),
//! composites every translucent surface along the ray back to front, and
//! writes the result into an RGBA8 framebuffer. Rows render in parallel
//! with rayon.

mod camera;
mod composite;
mod intersect;
mod renderer;

use image::ColorType;
use thiserror::Error;

pub use camera::{IsometricCamera, DEFAULT_HEIGHT, DEFAULT_IMAGE_SIZE, DEFAULT_PIXEL_SCALE};
pub use composite::{cast, composite, delinearize, linearize, Accumulator, GAMMA};
pub use intersect::{intersect, Intersection, TriangleHit, EPSILON};
pub use renderer::{render, render_pixel, Framebuffer};

/// Errors that abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The texture is not straight 8-bit RGBA.
    #[error("Unsupported texture color model {0:?}, expected straight RGBA8")]
    UnsupportedColorModel(ColorType),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Re-export math types from isotrace_math
pub use isotrace_math::{DVec3, Ray};
