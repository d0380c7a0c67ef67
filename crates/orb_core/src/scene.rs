//! Scene description types for orb.
//!
//! A scene is an ordered list of spheres. Spheres with a positive emission
//! component are lights, everything else is an opaque surface. These types
//! carry no intersection logic; the renderer builds its own primitives
//! from them after validation.

use orb_math::{Vec3, VectorExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Sphere {index}: radius must be finite and positive, got {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Sphere {index}: surface color {color} has a component outside [0, 1]")]
    ColorOutOfRange { index: usize, color: Vec3 },

    #[error("Sphere {index}: {name} must be within [0, 1], got {value}")]
    CoefficientOutOfRange {
        index: usize,
        name: &'static str,
        value: f32,
    },

    #[error("Sphere {index}: emission color {color} must be finite and non-negative")]
    InvalidEmission { index: usize, color: Vec3 },

    #[error("Sphere {index}: center {center} is not finite")]
    NonFiniteCenter { index: usize, center: Vec3 },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// One sphere as written in a scene file.
///
/// Vectors are serialized as `[x, y, z]` arrays (colors as `[r, g, b]`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    /// Center position
    pub center: Vec3,

    /// Radius, must be > 0
    pub radius: f32,

    /// Surface color (RGB, 0-1)
    pub surface_color: Vec3,

    /// Reflectivity (0-1). Carried for completeness, the tracer reflects
    /// every surface the same way.
    #[serde(default)]
    pub reflection: f32,

    /// Transparency (0-1). Not used by the tracer; shadows are binary.
    #[serde(default)]
    pub transparency: f32,

    /// Emission (RGB). Any positive component makes this sphere a light.
    #[serde(default = "zero")]
    pub emission_color: Vec3,
}

fn zero() -> Vec3 {
    Vec3::ZERO
}

impl SphereDesc {
    /// Create an opaque, non-emissive sphere.
    pub fn new(center: Vec3, radius: f32, surface_color: Vec3) -> Self {
        Self {
            center,
            radius,
            surface_color,
            reflection: 0.0,
            transparency: 0.0,
            emission_color: Vec3::ZERO,
        }
    }

    /// Create a light: black surface with the given emission.
    pub fn light(center: Vec3, radius: f32, emission_color: Vec3) -> Self {
        Self {
            emission_color,
            ..Self::new(center, radius, Vec3::ZERO)
        }
    }

    /// Set reflection and transparency.
    pub fn with_coefficients(mut self, reflection: f32, transparency: f32) -> Self {
        self.reflection = reflection;
        self.transparency = transparency;
        self
    }

    /// Check if this sphere emits light.
    pub fn is_light(&self) -> bool {
        self.emission_color.has_positive_component()
    }

    /// Validate this sphere. `index` is only used in error messages.
    pub fn validate(&self, index: usize) -> SceneResult<()> {
        if !self.center.is_finite() {
            return Err(SceneError::NonFiniteCenter {
                index,
                center: self.center,
            });
        }

        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SceneError::InvalidRadius {
                index,
                radius: self.radius,
            });
        }

        let c = self.surface_color;
        if !(in_unit_range(c.x) && in_unit_range(c.y) && in_unit_range(c.z)) {
            return Err(SceneError::ColorOutOfRange { index, color: c });
        }

        for (name, value) in [
            ("reflection", self.reflection),
            ("transparency", self.transparency),
        ] {
            if !in_unit_range(value) {
                return Err(SceneError::CoefficientOutOfRange { index, name, value });
            }
        }

        let e = self.emission_color;
        if !e.is_finite() || e.min_element() < 0.0 {
            return Err(SceneError::InvalidEmission { index, color: e });
        }

        Ok(())
    }
}

fn in_unit_range(x: f32) -> bool {
    (0.0..=1.0).contains(&x)
}

/// An ordered list of spheres.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    pub spheres: Vec<SphereDesc>,
}

impl SceneDesc {
    /// Create a scene from a list of spheres.
    pub fn new(spheres: Vec<SphereDesc>) -> Self {
        Self { spheres }
    }

    /// The default scene: a golf ball next to a hole on a green, lit by
    /// one light off to the right.
    pub fn golf() -> Self {
        Self::new(vec![
            // hole
            SphereDesc::new(Vec3::new(-22.0, 0.0, -15.0), 20.0, Vec3::ZERO),
            // golf ball
            SphereDesc::new(Vec3::new(0.0, -1.0, -10.0), 1.0, Vec3::new(0.4, 0.7, 0.9)),
            // ground
            SphereDesc::new(Vec3::new(-100.0, 0.0, -10.0), 98.0, Vec3::new(0.1, 0.9, 0.1)),
            // light
            SphereDesc::light(Vec3::new(10.0, 0.0, 0.0), 5.0, Vec3::splat(3.0)),
        ])
    }

    /// Validate every sphere, failing on the first bad one.
    pub fn validate(&self) -> SceneResult<()> {
        self.spheres
            .iter()
            .enumerate()
            .try_for_each(|(i, sphere)| sphere.validate(i))
    }

    /// Number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene has no spheres.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Number of emissive spheres.
    pub fn light_count(&self) -> usize {
        self.spheres.iter().filter(|s| s.is_light()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golf_scene() {
        let scene = SceneDesc::golf();
        assert_eq!(scene.len(), 4);
        assert_eq!(scene.light_count(), 1);
        assert!(scene.spheres[3].is_light());
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_parse_defaults() {
        let json = r#"{
            "spheres": [
                { "center": [0.0, -1.0, -10.0], "radius": 1.0, "surface_color": [0.4, 0.7, 0.9] },
                { "center": [10.0, 0.0, 0.0], "radius": 5.0, "surface_color": [0.0, 0.0, 0.0],
                  "emission_color": [3.0, 3.0, 3.0] }
            ]
        }"#;

        let scene: SceneDesc = serde_json::from_str(json).unwrap();
        assert!(scene.validate().is_ok());
        assert_eq!(scene.len(), 2);

        // Omitted fields fall back to zero
        let ball = &scene.spheres[0];
        assert_eq!(ball.emission_color, Vec3::ZERO);
        assert_eq!(ball.reflection, 0.0);
        assert_eq!(ball.transparency, 0.0);
        assert!(!ball.is_light());

        assert!(scene.spheres[1].is_light());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let sphere = SphereDesc::new(Vec3::ZERO, 0.0, Vec3::ONE);
        assert!(matches!(
            sphere.validate(2),
            Err(SceneError::InvalidRadius { index: 2, .. })
        ));

        let sphere = SphereDesc::new(Vec3::ZERO, -1.0, Vec3::ONE);
        assert!(sphere.validate(0).is_err());

        let sphere = SphereDesc::new(Vec3::ZERO, f32::NAN, Vec3::ONE);
        assert!(sphere.validate(0).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let bad_color = SphereDesc::new(Vec3::ZERO, 1.0, Vec3::new(1.5, 0.0, 0.0));
        assert!(matches!(
            bad_color.validate(0),
            Err(SceneError::ColorOutOfRange { .. })
        ));

        let bad_reflection = SphereDesc::new(Vec3::ZERO, 1.0, Vec3::ONE).with_coefficients(2.0, 0.0);
        assert!(matches!(
            bad_reflection.validate(0),
            Err(SceneError::CoefficientOutOfRange { name: "reflection", .. })
        ));

        let bad_emission = SphereDesc::light(Vec3::ZERO, 1.0, Vec3::new(-1.0, 3.0, 3.0));
        assert!(matches!(
            bad_emission.validate(0),
            Err(SceneError::InvalidEmission { .. })
        ));
    }
}
