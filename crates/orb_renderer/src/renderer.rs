//! Per-pixel driver: primary rays in, composited image out.

use orb_core::{Background, RenderConfig};
use rayon::prelude::*;

use crate::{trace, Camera, Color, Scene, Trace, TraceMode};

/// Anything that can supply a background color for an output pixel.
pub trait BackgroundSource: Sync {
    /// Color for pixel (x, y) of a `width` x `height` image.
    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> Color;
}

impl BackgroundSource for Background {
    fn color_at(&self, x: u32, y: u32, width: u32, height: u32) -> Color {
        self.sample_for(x, y, width, height)
    }
}

/// A solid color background.
impl BackgroundSource for Color {
    fn color_at(&self, _x: u32, _y: u32, _width: u32, _height: u32) -> Color {
        *self
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGB. No gamma is applied.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    [
        (255.0 * clamp_01(color.x)).round() as u8,
        (255.0 * clamp_01(color.y)).round() as u8,
        (255.0 * clamp_01(color.z)).round() as u8,
    ]
}

/// Row-major float RGB image, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    /// Flatten to `width * height * 3` floats, the layout display sinks
    /// expect.
    pub fn to_rgb_f32(&self) -> Vec<f32> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Convert to 8-bit RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| color_to_rgb8(*c))
            .collect()
    }
}

/// Shade a single pixel: the traced color on a hit, the background on a miss.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    background: &dyn BackgroundSource,
    config: &RenderConfig,
    x: u32,
    y: u32,
) -> Color {
    let ray = camera.primary_ray(x, y);
    match trace(&ray, scene, TraceMode::Primary, config) {
        Trace::Hit(color) => color,
        Trace::Miss => background.color_at(x, y, camera.image_width, camera.image_height),
    }
}

/// Render the entire scene to an image buffer, one pixel at a time.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    background: &dyn BackgroundSource,
    config: &RenderConfig,
) -> ImageBuffer {
    log::debug!(
        "Rendering {}x{} ({} objects), single-threaded",
        camera.image_width,
        camera.image_height,
        scene.len()
    );

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, scene, background, config, x, y);
            image.set(x, y, color);
        }
    }

    image
}

/// Render the scene with one rayon task per scanline.
///
/// Each pixel is written exactly once and the scene is shared read-only,
/// so the result is identical to `render`.
pub fn render_parallel(
    camera: &Camera,
    scene: &Scene,
    background: &dyn BackgroundSource,
    config: &RenderConfig,
) -> ImageBuffer {
    log::debug!(
        "Rendering {}x{} ({} objects) on {} threads",
        camera.image_width,
        camera.image_height,
        scene.len(),
        rayon::current_num_threads()
    );

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let width = camera.image_width as usize;
    if width == 0 {
        return image;
    }

    image
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(camera, scene, background, config, x as u32, y as u32);
            }
        });

    image
}
