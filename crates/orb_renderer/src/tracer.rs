//! The recursive shading core.
//!
//! A primary trace finds the nearest sphere, lights it with hard shadows
//! from every light and adds a highlight from exactly one reflection probe.
//! The probe itself never shades or recurses: it only reports whether the
//! reflected ray reaches a light, and if so hands back its own direction.

use orb_core::RenderConfig;
use orb_math::{Ray, Vec3, VectorExt};

use crate::{Color, Scene, SceneObject, Sphere};

/// Which kind of trace is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    /// Camera ray: full shading plus one reflection probe.
    Primary,
    /// Reflection probe: tests lights only, no shading, no further recursion.
    ReflectionProbe,
}

/// Result of a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trace {
    /// Something was hit. For `Primary` the payload is the shaded color,
    /// for `ReflectionProbe` it is the probe ray's direction.
    Hit(Vec3),
    /// Nothing was hit; the caller shows the background.
    Miss,
}

impl Trace {
    /// The hit payload, if any.
    pub fn hit(self) -> Option<Vec3> {
        match self {
            Trace::Hit(v) => Some(v),
            Trace::Miss => None,
        }
    }

    pub fn is_miss(self) -> bool {
        matches!(self, Trace::Miss)
    }
}

/// Trace a ray through the scene.
pub fn trace(ray: &Ray, scene: &Scene, mode: TraceMode, config: &RenderConfig) -> Trace {
    let Some((t, sphere)) = nearest_hit(ray, scene, mode) else {
        return Trace::Miss;
    };

    if mode == TraceMode::ReflectionProbe {
        return Trace::Hit(ray.direction);
    }

    let phit = ray.at(t);
    let mut nhit = (phit - sphere.center).normalized();
    // Face the normal against the incoming ray
    if ray.direction.dot(nhit) > 0.0 {
        nhit = -nhit;
    }

    let color = direct_light(sphere, phit, nhit, scene, config)
        + reflection_highlight(ray, phit, nhit, scene, config);

    Trace::Hit(color)
}

/// Closest sphere along the ray. Primary rays consider every object,
/// probes only the lights.
fn nearest_hit<'a>(ray: &Ray, scene: &'a Scene, mode: TraceMode) -> Option<(f32, &'a Sphere)> {
    let mut nearest: Option<(f32, &Sphere)> = None;

    for object in scene.objects() {
        let sphere = match (mode, object) {
            (TraceMode::ReflectionProbe, SceneObject::Surface(_)) => continue,
            (_, obj) => obj.sphere(),
        };

        if let Some((t0, t1)) = sphere.intersect(ray.origin, ray.direction) {
            let t = if t0 < 0.0 { t1 } else { t0 };
            if nearest.map_or(true, |(near, _)| t < near) {
                nearest = Some((t, sphere));
            }
        }
    }

    nearest
}

/// Sum of every light's contribution at `phit`.
///
/// Each light adds `surface * ambient * T * max(0, n.L) * emission` plus a
/// flat `surface * diffuse`, where T is 0 if any other object lies along
/// the shadow ray and 1 otherwise.
fn direct_light(
    surface: &Sphere,
    phit: Vec3,
    nhit: Vec3,
    scene: &Scene,
    config: &RenderConfig,
) -> Color {
    let shadow_origin = phit + nhit * config.surface_bias;
    let mut color = Color::ZERO;

    for (light_index, light) in scene.lights() {
        let light_dir = (light.center - phit).normalized();

        // Any intersection counts, even one past the light
        let occluded = scene
            .objects()
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != light_index)
            .any(|(_, obj)| obj.sphere().intersect(shadow_origin, light_dir).is_some());
        let transmission = if occluded { 0.0 } else { 1.0 };

        color += surface.surface_color
            * config.ambient
            * transmission
            * nhit.dot(light_dir).max(0.0)
            * light.emission_color
            + surface.surface_color * config.diffuse;
    }

    color
}

/// Highlight from the single reflection probe.
///
/// If the mirrored ray reaches a light, every channel gets
/// `-specular / (r.d)^3`, where `r` is the probe direction and `d` the
/// incoming direction. This is a stylized term, not a BRDF: it is kept
/// as-is for image compatibility even though it can go negative.
fn reflection_highlight(
    ray: &Ray,
    phit: Vec3,
    nhit: Vec3,
    scene: &Scene,
    config: &RenderConfig,
) -> Color {
    let d = ray.direction;
    let refl_dir = (d - nhit * 2.0 * d.dot(nhit)).normalized();
    let probe = Ray::new(phit + nhit * config.surface_bias, refl_dir);

    match trace(&probe, scene, TraceMode::ReflectionProbe, config) {
        Trace::Hit(r) if r.is_nonzero() => {
            let r1 = r.dot(d);
            Color::splat(-config.specular / (r1 * r1 * r1))
        }
        _ => Color::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALL_COLOR: Vec3 = Vec3::new(0.4, 0.7, 0.9);

    fn ball() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0).with_surface_color(BALL_COLOR)
    }

    fn light_at(center: Vec3) -> Sphere {
        Sphere::new(center, 1.0).with_emission(Vec3::splat(3.0))
    }

    fn forward() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    fn assert_color_eq(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).abs().max_element() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_miss_returns_miss() {
        let mut scene = Scene::new();
        scene.add_surface(Sphere::new(Vec3::new(5.0, 0.0, -10.0), 1.0)).unwrap();

        let result = trace(&forward(), &scene, TraceMode::Primary, &RenderConfig::default());
        assert_eq!(result, Trace::Miss);
        assert!(result.is_miss());
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let mut scene = Scene::new();
        let far = Sphere::new(Vec3::new(0.0, 0.0, -20.0), 1.0);
        let near = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        scene.add_surface(far).unwrap();
        scene.add_surface(near.clone()).unwrap();

        let (t, sphere) = nearest_hit(&forward(), &scene, TraceMode::Primary).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert_eq!(sphere, &near);
    }

    #[test]
    fn test_occluded_light_leaves_diffuse_only() {
        let mut scene = Scene::new();
        scene.add_surface(ball()).unwrap();
        // Sits on the shadow ray from the ball's front toward the light,
        // well off the camera ray.
        scene.add_surface(Sphere::new(Vec3::new(0.0, 5.0, -3.5), 1.0)).unwrap();
        scene.add_light(light_at(Vec3::new(0.0, 10.0, 0.0))).unwrap();

        let config = RenderConfig::default();
        let color = trace(&forward(), &scene, TraceMode::Primary, &config)
            .hit()
            .unwrap();

        assert_color_eq(color, Vec3::new(0.16, 0.28, 0.36));
    }

    #[test]
    fn test_unoccluded_light_adds_ambient_term() {
        let mut scene = Scene::new();
        scene.add_surface(ball()).unwrap();
        scene.add_light(light_at(Vec3::new(0.0, 10.0, 0.0))).unwrap();

        let config = RenderConfig::default();
        let color = trace(&forward(), &scene, TraceMode::Primary, &config)
            .hit()
            .unwrap();

        // phit = (0, 0, -9), normal +Z, light direction normalize(0, 10, 9)
        let n_dot_l = Vec3::new(0.0, 10.0, 9.0).normalize().z;
        let expected = BALL_COLOR * 0.6 * n_dot_l * 3.0 + BALL_COLOR * 0.4;
        assert_color_eq(color, expected);
    }

    #[test]
    fn test_head_on_light_exact_arithmetic() {
        // Light straight behind the camera: n.L = 1 and the reflection
        // probe reaches it, so the highlight is -0.1 / (-1)^3 = +0.1.
        let mut scene = Scene::new();
        scene.add_surface(ball()).unwrap();
        scene.add_light(light_at(Vec3::new(0.0, 0.0, 10.0))).unwrap();

        let config = RenderConfig::default();
        let color = trace(&forward(), &scene, TraceMode::Primary, &config)
            .hit()
            .unwrap();
        let expected = BALL_COLOR * 0.6 * 3.0 + BALL_COLOR * 0.4 + Vec3::splat(0.1);
        assert_color_eq(color, expected);

        // Without the highlight only ambient + diffuse remain
        let no_spec = RenderConfig::default().with_weights(0.6, 0.4, 0.0);
        let color = trace(&forward(), &scene, TraceMode::Primary, &no_spec)
            .hit()
            .unwrap();
        assert_color_eq(color, Vec3::new(0.88, 1.54, 1.98));
    }

    #[test]
    fn test_primary_ray_can_hit_light() {
        let mut scene = Scene::new();
        scene.add_light(light_at(Vec3::new(0.0, 0.0, -10.0))).unwrap();

        let result = trace(&forward(), &scene, TraceMode::Primary, &RenderConfig::default());

        // Black surface facing away from its own center: shaded to zero,
        // but still a hit rather than background.
        assert_eq!(result, Trace::Hit(Vec3::ZERO));
    }

    #[test]
    fn test_reflection_mode_ignores_surfaces() {
        let mut scene = Scene::new();
        scene.add_surface(ball()).unwrap();

        let result = trace(
            &forward(),
            &scene,
            TraceMode::ReflectionProbe,
            &RenderConfig::default(),
        );
        assert_eq!(result, Trace::Miss);
    }

    #[test]
    fn test_reflection_mode_returns_ray_direction() {
        let mut scene = Scene::new();
        // A surface in front of the light must not block the probe
        scene.add_surface(ball()).unwrap();
        scene.add_light(light_at(Vec3::new(0.0, 0.0, -30.0))).unwrap();

        let ray = forward();
        let result = trace(&ray, &scene, TraceMode::ReflectionProbe, &RenderConfig::default());
        assert_eq!(result, Trace::Hit(ray.direction));
    }

    #[test]
    fn test_single_reflection_step() {
        // Two balls facing each other along the reflected path would
        // bounce forever in a full tracer; here the probe from the front
        // ball only looks for lights, so the shade is exactly one step deep.
        let mut scene = Scene::new();
        scene.add_surface(ball()).unwrap();
        scene
            .add_surface(
                Sphere::new(Vec3::new(0.0, 0.0, 4.0), 1.0)
                    .with_surface_color(Vec3::ONE)
                    .with_coefficients(1.0, 0.0),
            )
            .unwrap();
        scene.add_light(light_at(Vec3::new(0.0, 0.0, 10.0))).unwrap();

        let config = RenderConfig::default();
        let color = trace(&forward(), &scene, TraceMode::Primary, &config)
            .hit()
            .unwrap();

        // The mirror ball shadows the light, the probe still reaches it
        let expected = BALL_COLOR * 0.4 + Vec3::splat(0.1);
        assert_color_eq(color, expected);
    }

    #[test]
    fn test_reflection_mode_never_shades() {
        // A colored light in front, lit by a second light behind the
        // camera: a primary trace shades it, a reflection trace along the
        // same ray only reports the direction.
        let mut scene = Scene::new();
        scene
            .add_light(light_at(Vec3::new(0.0, 0.0, -10.0)).with_surface_color(Vec3::splat(0.5)))
            .unwrap();
        scene.add_light(light_at(Vec3::new(0.0, 0.0, 10.0))).unwrap();

        let config = RenderConfig::default();
        let ray = forward();

        // Self: 0.5 * 0.4; back light: 0.5 * 0.6 * 3 + 0.5 * 0.4; highlight: 0.1
        let shaded = trace(&ray, &scene, TraceMode::Primary, &config).hit().unwrap();
        assert_color_eq(shaded, Vec3::splat(1.4));

        let reflected = trace(&ray, &scene, TraceMode::ReflectionProbe, &config);
        assert_eq!(reflected, Trace::Hit(ray.direction));
    }
}
