//! Per-pixel shading: depth-sorted alpha compositing of every surface a
//! ray passes through.
//!
//! Hits are blended back to front with the "over" operator. Blending
//! happens in linear space using a 2.2 power curve; the result is converted
//! back to display space for output.

use std::collections::BTreeSet;

use isotrace_core::Scene;
use isotrace_math::{DVec3, Ray};

use crate::intersect::{intersect, Intersection};
use crate::{RenderError, RenderResult};

/// Display gamma of textures and output.
pub const GAMMA: f64 = 2.2;

/// Convert an 8-bit display-space channel to linear space.
///
/// The channel must be straight (not multiplied by alpha).
#[inline]
pub fn linearize(channel: u8) -> f64 {
    (f64::from(channel) / 255.0).powf(GAMMA)
}

/// Convert a linear channel back to 8-bit display space.
#[inline]
pub fn delinearize(linear: f64) -> u8 {
    quantize(linear.powf(1.0 / GAMMA))
}

/// Scale `[0, 1]` to `[0, 255]`, rounding half up and clamping.
#[inline]
fn quantize(x: f64) -> u8 {
    (x * 255.0 + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Running back-to-front blend of one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    /// Linear-space color
    pub color: DVec3,
    pub alpha: f64,
}

impl Accumulator {
    /// Blend a straight RGBA8 texel over the current contents.
    ///
    /// Fully transparent texels leave the accumulator untouched.
    pub fn over(&mut self, texel: [u8; 4]) {
        let [r, g, b, a] = texel;
        if a == 0 {
            return;
        }
        let src_alpha = f64::from(a) / 255.0;
        let src = DVec3::new(linearize(r), linearize(g), linearize(b));

        let alpha = src_alpha + self.alpha * (1.0 - src_alpha);
        self.color = ((1.0 - src_alpha) * self.alpha * self.color + src_alpha * src) / alpha;
        self.alpha = alpha;
    }

    /// Final display-space RGBA8 value.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            delinearize(self.color.x),
            delinearize(self.color.y),
            delinearize(self.color.z),
            quantize(self.alpha),
        ]
    }
}

/// Shade one ray: query the scene's KD-tree, then composite the hits.
pub fn cast(scene: &Scene, ray: &Ray) -> RenderResult<[u8; 4]> {
    let candidates = scene.index().candidates(ray);
    composite(scene, ray, &candidates)
}

/// Composite the surfaces among `candidates` that `ray` actually hits.
///
/// Fails if the scene texture is not straight RGBA8; the check runs on
/// every call, whether or not anything was hit.
pub fn composite(scene: &Scene, ray: &Ray, candidates: &BTreeSet<usize>) -> RenderResult<[u8; 4]> {
    let triangles = scene.mesh().triangles();
    let mut hits: Vec<Intersection> = candidates
        .iter()
        .filter_map(|&i| intersect(ray, &triangles[i]).map(|hit| Intersection::new(i, hit)))
        .collect();

    // Farthest first; stable, so equal depths keep ascending triangle order
    hits.sort_by(|a, b| b.t.total_cmp(&a.t));

    let texture = scene
        .texture()
        .as_straight_rgba()
        .ok_or_else(|| RenderError::UnsupportedColorModel(scene.texture().color_type()))?;

    let uvs = scene.mesh().uvs();
    let mut pixel = Accumulator::default();
    for hit in &hits {
        let tex = uvs[hit.triangle].interpolate(hit.u, hit.v);
        pixel.over(texture.texel(tex.x, tex.y));
    }

    Ok(pixel.to_rgba8())
}
