//! Pinhole camera for primary ray generation.

use orb_core::RenderConfig;
use orb_math::{Ray, Vec3, VectorExt};
use std::f32::consts::PI;

/// Fixed camera at `eye`, looking down -Z with +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    eye: Vec3,
    fov: f32, // degrees

    // Cached computed values (set by initialize())
    inv_width: f32,
    inv_height: f32,
    aspect_ratio: f32,
    angle: f32,
}

impl Camera {
    /// Create a new camera with the stock 500x500, 40 degree settings.
    pub fn new() -> Self {
        let mut camera = Self {
            image_width: 500,
            image_height: 500,
            eye: Vec3::ZERO,
            fov: 40.0,
            inv_width: 0.0,
            inv_height: 0.0,
            aspect_ratio: 1.0,
            angle: 0.0,
        };
        camera.initialize();
        camera
    }

    /// Camera matching a render configuration.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new()
            .with_resolution(config.width, config.height)
            .with_eye(config.eye)
            .with_fov(config.fov)
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.initialize();
        self
    }

    /// Set the eye position.
    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    /// Set the field of view in degrees.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self.initialize();
        self
    }

    fn initialize(&mut self) {
        let width = self.image_width.max(1) as f32;
        let height = self.image_height.max(1) as f32;

        self.inv_width = 1.0 / width;
        self.inv_height = 1.0 / height;
        self.aspect_ratio = width / height;
        self.angle = (PI / 2.0 * self.fov / 180.0).tan();
    }

    /// Ray from the eye through the center of pixel (x, y).
    ///
    /// (0, 0) is the top-left pixel.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let px = self.aspect_ratio
            * self.angle
            * (2.0 * ((x as f32 + 0.5) * self.inv_width) - 1.0);
        let py = self.angle * (1.0 - 2.0 * ((y as f32 + 0.5) * self.inv_height));

        let direction = Vec3::new(px, py, -1.0).normalized();
        Ray::new(self.eye, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
