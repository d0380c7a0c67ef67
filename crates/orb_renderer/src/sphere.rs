//! Sphere primitive for ray tracing.

use orb_core::{SceneError, SceneResult, SphereDesc};
use orb_math::Vec3;

use crate::Color;

/// A sphere, either an opaque surface or a light.
///
/// Immutable once built; `radius2` is cached for the intersection test.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub radius2: f32,
    pub surface_color: Color,
    pub emission_color: Color,
    pub reflection: f32,
    /// Stored but unused: shadows are all-or-nothing.
    pub transparency: f32,
}

impl Sphere {
    /// Create a black, non-emissive sphere.
    ///
    /// The radius is not checked here; `Scene` rejects spheres whose
    /// radius is not finite and positive when they are added. Use
    /// `try_new` to fail at construction instead.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius,
            radius2: radius * radius,
            surface_color: Color::ZERO,
            emission_color: Color::ZERO,
            reflection: 0.0,
            transparency: 0.0,
        }
    }

    /// Create a sphere, rejecting a radius that is not finite and positive.
    pub fn try_new(center: Vec3, radius: f32) -> SceneResult<Self> {
        let sphere = Self::new(center, radius);
        sphere.check_radius(0)?;
        Ok(sphere)
    }

    /// Radius must be finite and > 0. `index` is only used in the error.
    pub(crate) fn check_radius(&self, index: usize) -> SceneResult<()> {
        if self.radius.is_finite() && self.radius > 0.0 {
            Ok(())
        } else {
            Err(SceneError::InvalidRadius {
                index,
                radius: self.radius,
            })
        }
    }

    /// Set the surface color.
    pub fn with_surface_color(mut self, color: Color) -> Self {
        self.surface_color = color;
        self
    }

    /// Set the emission color.
    pub fn with_emission(mut self, color: Color) -> Self {
        self.emission_color = color;
        self
    }

    /// Set reflection and transparency.
    pub fn with_coefficients(mut self, reflection: f32, transparency: f32) -> Self {
        self.reflection = reflection;
        self.transparency = transparency;
        self
    }

    /// Geometric ray/sphere test.
    ///
    /// Returns the entry and exit distances `(t0, t1)` along `direction`
    /// (assumed normalized). A sphere whose center projects behind the
    /// origin (`tca < 0`) is a miss, even when the origin is inside it.
    pub fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<(f32, f32)> {
        let l = self.center - origin;
        let tca = l.dot(direction);
        if tca < 0.0 {
            return None;
        }

        let d2 = l.dot(l) - tca * tca;
        if d2 > self.radius2 {
            return None;
        }

        let thc = (self.radius2 - d2).sqrt();
        Some((tca - thc, tca + thc))
    }
}

impl From<&SphereDesc> for Sphere {
    fn from(desc: &SphereDesc) -> Self {
        Sphere::new(desc.center, desc.radius)
            .with_surface_color(desc.surface_color)
            .with_emission(desc.emission_color)
            .with_coefficients(desc.reflection, desc.transparency)
    }
}
