//! Background image loading.
//!
//! Rays that miss every sphere show the background instead. The image is
//! decoded once up front into float RGB, top row first, and sampled with a
//! nearest-neighbour lookup.

use std::path::Path;

use orb_math::Vec3;
use thiserror::Error;

/// Errors that can occur while loading a background.
#[derive(Error, Debug)]
pub enum BackgroundError {
    #[error("Failed to load background {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Background {0} has no pixels")]
    Empty(String),

    #[error("Pixel count {actual} does not match {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
}

pub type BackgroundResult<T> = Result<T, BackgroundError>;

/// A decoded background image.
#[derive(Clone, Debug)]
pub struct Background {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// RGB in [0, 1], row-major, top row first
    pub pixels: Vec<Vec3>,

    /// Where the image came from (for logging)
    pub path: String,
}

impl Background {
    /// Build a background from raw pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Vec3>) -> BackgroundResult<Self> {
        if width == 0 || height == 0 {
            return Err(BackgroundError::Empty("<memory>".to_string()));
        }
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(BackgroundError::SizeMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            path: "<memory>".to_string(),
        })
    }

    /// A single-color background.
    pub fn solid(color: Vec3, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
            path: "<solid>".to_string(),
        }
    }

    /// Load a background from an image file.
    ///
    /// Channels are scaled by 1/255 as-is; no sRGB decoding is applied, so
    /// the file's byte values end up on screen unchanged.
    pub fn load(path: impl AsRef<Path>) -> BackgroundResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let img = image::open(path).map_err(|source| BackgroundError::Load {
            path: display.clone(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(BackgroundError::Empty(display));
        }

        let pixels = rgb
            .pixels()
            .map(|p| {
                Vec3::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                )
            })
            .collect();

        log::debug!("Loaded background: {} ({}x{})", display, width, height);

        Ok(Self {
            width,
            height,
            pixels,
            path: display,
        })
    }

    /// Get the pixel at (x, y). Out-of-range coordinates are clamped to
    /// the nearest edge; an empty image reads as black.
    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.pixels.get(idx).copied().unwrap_or(Vec3::ZERO)
    }

    /// Sample the background for output pixel (x, y) of an
    /// `out_width` x `out_height` image (nearest neighbour, no filtering).
    pub fn sample_for(&self, x: u32, y: u32, out_width: u32, out_height: u32) -> Vec3 {
        let bx = scale_coord(x, self.width, out_width);
        let by = scale_coord(y, self.height, out_height);
        self.pixel(bx, by)
    }
}

/// Map `coord` in `[0, from)` onto `[0, to)`.
fn scale_coord(coord: u32, to: u32, from: u32) -> u32 {
    if from == 0 {
        return 0;
    }
    ((coord as u64 * to as u64) / from as u64) as u32
}
