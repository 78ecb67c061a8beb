//! Isometric camera for ray generation.
//!
//! All rays are parallel and travel straight down the -Z axis. Pixel
//! `(x, y)` of a `d x d` image starts at
//! `((x - d/2) / scale, (d - y - 1) / scale, height)`, so image rows run
//! top-down while world Y points up.

use isotrace_math::{DVec3, Ray};

/// Default output size in pixels (square).
pub const DEFAULT_IMAGE_SIZE: u32 = 256;

/// Default world units per pixel divisor, calibrated for the reference
/// scene's unit scale.
pub const DEFAULT_PIXEL_SCALE: f64 = 1000.0;

/// Default Z of the ray origins; must sit above the geometry.
pub const DEFAULT_HEIGHT: f64 = 10.0;

/// Camera casting one parallel ray per pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsometricCamera {
    /// Width and height of the (square) image
    pub image_size: u32,
    /// Pixels per world unit
    pub pixel_scale: f64,
    /// Z coordinate every ray starts at
    pub height: f64,
}

impl IsometricCamera {
    /// Create a camera with the default calibration.
    pub fn new() -> Self {
        Self {
            image_size: DEFAULT_IMAGE_SIZE,
            pixel_scale: DEFAULT_PIXEL_SCALE,
            height: DEFAULT_HEIGHT,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, size: u32) -> Self {
        self.image_size = size;
        self
    }

    /// Set world scale and ray start height.
    pub fn with_scale(mut self, pixel_scale: f64, height: f64) -> Self {
        self.pixel_scale = pixel_scale;
        self.height = height;
        self
    }

    /// Direction shared by every ray.
    pub fn direction(&self) -> DVec3 {
        DVec3::new(0.0, 0.0, -1.0)
    }

    /// Get the ray for pixel `(x, y)`.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let d = i64::from(self.image_size);
        let (x, y) = (i64::from(x), i64::from(y));
        let origin = DVec3::new(
            (x - d / 2) as f64 / self.pixel_scale,
            (d - y - 1) as f64 / self.pixel_scale,
            self.height,
        );
        Ray::new(origin, self.direction())
    }
}

impl Default for IsometricCamera {
    fn default() -> Self {
        Self::new()
    }
}
