//! Display sinks: where a finished image goes.

use std::path::PathBuf;

use crate::ImageBuffer;

/// Receives the final image once a render completes.
pub trait DisplaySink {
    fn present(&mut self, image: &ImageBuffer) -> image::ImageResult<()>;
}

/// Writes the image to a file. The format follows the extension
/// (`.png`, `.ppm`, `.bmp`, ...).
#[derive(Debug, Clone)]
pub struct ImageFileSink {
    path: PathBuf,
}

impl ImageFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DisplaySink for ImageFileSink {
    fn present(&mut self, image: &ImageBuffer) -> image::ImageResult<()> {
        let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;

        rgb.save(&self.path)?;
        log::info!(
            "Wrote {}x{} image to {}",
            image.width,
            image.height,
            self.path.display()
        );
        Ok(())
    }
}
