//! Parallel render driver.
//!
//! One rayon task per image row. Rows write into disjoint slices of the
//! framebuffer, so no locking is needed, and the result does not depend on
//! how the tasks are scheduled.

use std::time::Instant;

use image::RgbaImage;
use isotrace_core::Scene;
use rayon::prelude::*;

use crate::composite::cast;
use crate::{IsometricCamera, RenderResult};

/// Output raster: straight RGBA8, row-major, top row first.
pub type Framebuffer = RgbaImage;

/// Bytes per framebuffer pixel.
const CHANNELS: usize = 4;

/// Render a single pixel.
pub fn render_pixel(
    scene: &Scene,
    camera: &IsometricCamera,
    x: u32,
    y: u32,
) -> RenderResult<[u8; 4]> {
    cast(scene, &camera.get_ray(x, y))
}

/// Render one row into its slice of the framebuffer.
fn render_row(
    scene: &Scene,
    camera: &IsometricCamera,
    y: u32,
    row: &mut [u8],
) -> RenderResult<()> {
    for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
        pixel.copy_from_slice(&render_pixel(scene, camera, x as u32, y)?);
    }
    Ok(())
}

/// Render the entire scene.
///
/// Every row finishes before the image is returned. If any pixel fails,
/// the remaining rows are abandoned and the error is returned instead of
/// a partial image.
pub fn render(scene: &Scene, camera: &IsometricCamera) -> RenderResult<Framebuffer> {
    let size = camera.image_size;
    let mut framebuffer = Framebuffer::new(size, size);
    if size == 0 {
        return Ok(framebuffer);
    }

    log::info!(
        "Rendering {}x{} over {} triangles",
        size,
        size,
        scene.triangle_count()
    );
    let start = Instant::now();

    let row_len = size as usize * CHANNELS;
    let pixels: &mut [u8] = &mut framebuffer;
    pixels
        .par_chunks_mut(row_len)
        .enumerate()
        .try_for_each(|(y, row)| render_row(scene, camera, y as u32, row))?;

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(framebuffer)
}
