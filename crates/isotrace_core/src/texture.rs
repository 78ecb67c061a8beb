//! Texture loading and nearest-texel sampling.
//!
//! Textures are decoded with the `image` crate and kept in their decoded
//! color model. The loader accepts any model; the compositor asks for a
//! straight (non-premultiplied) 8-bit RGBA view with [`Texture::as_straight_rgba`]
//! and treats any other model as a format error.

use std::path::Path;

use image::{ColorType, DynamicImage, GenericImageView, RgbaImage};
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture raster.
#[derive(Clone, Debug)]
pub struct Texture {
    image: DynamicImage,

    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Where the texture came from (for diagnostics)
    pub source: String,
}

impl Texture {
    /// Wrap an already decoded image.
    pub fn from_image(image: DynamicImage, source: impl Into<String>) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image,
            width,
            height,
            source: source.into(),
        }
    }

    /// Decode a texture from an in-memory encoded image (PNG, JPEG, ...).
    pub fn from_bytes(bytes: &[u8]) -> TextureResult<Self> {
        let image = image::load_from_memory(bytes)?;
        let texture = Self::from_image(image, "<memory>");
        texture.log_loaded();
        Ok(texture)
    }

    /// Load and decode a texture file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;
        let texture = Self::from_image(image, path.to_string_lossy());
        texture.log_loaded();
        Ok(texture)
    }

    /// Color model of the decoded raster.
    pub fn color_type(&self) -> ColorType {
        self.image.color()
    }

    /// Straight 8-bit RGBA view of the texture, if that is its color model.
    ///
    /// No conversion is attempted: a texture decoded into any other model
    /// returns `None`.
    pub fn as_straight_rgba(&self) -> Option<StraightRgba<'_>> {
        self.image.as_rgba8().map(|image| StraightRgba { image })
    }

    fn log_loaded(&self) {
        log::debug!(
            "Loaded texture: {} ({}x{}, {:?})",
            self.source,
            self.width,
            self.height,
            self.color_type()
        );
    }
}

/// Borrowed view of a straight-alpha RGBA8 texture.
#[derive(Clone, Copy, Debug)]
pub struct StraightRgba<'a> {
    image: &'a RgbaImage,
}

impl StraightRgba<'_> {
    /// Fetch the texel covering texture-space point `(tx, ty)`.
    ///
    /// The texel is `(floor(width * tx), floor(height * ty))` with
    /// clamp-to-edge addressing: coordinates left of or above the raster
    /// read the first column/row, coordinates past the end read the last
    /// one. NaN coordinates read column/row 0. An empty raster samples as
    /// transparent black.
    pub fn texel(&self, tx: f64, ty: f64) -> [u8; 4] {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return [0; 4];
        }
        let x = clamp_to_edge((f64::from(width) * tx).floor(), width);
        let y = clamp_to_edge((f64::from(height) * ty).floor(), height);
        self.image.get_pixel(x, y).0
    }
}

/// Clamp a floored raster coordinate into `[0, size - 1]`.
#[inline]
fn clamp_to_edge(coord: f64, size: u32) -> u32 {
    // float-to-int `as` saturates and sends NaN to 0
    (coord as i64).clamp(0, i64::from(size) - 1) as u32
}
