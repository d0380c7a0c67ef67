//! Render-ready scene: spheres tagged as surfaces or lights.

use orb_core::{SceneDesc, SceneResult};

use crate::Sphere;

/// One entry in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    /// Opaque, shaded sphere
    Surface(Sphere),
    /// Emissive sphere. Still geometry: it can be hit and it casts shadows.
    Light(Sphere),
}

impl SceneObject {
    /// The underlying sphere regardless of kind.
    #[inline]
    pub fn sphere(&self) -> &Sphere {
        match self {
            SceneObject::Surface(s) | SceneObject::Light(s) => s,
        }
    }

    #[inline]
    pub fn is_light(&self) -> bool {
        matches!(self, SceneObject::Light(_))
    }
}

/// An ordered, read-only-during-render collection of scene objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a scene description and convert it.
    ///
    /// Spheres with a positive emission component become lights.
    pub fn from_desc(desc: &SceneDesc) -> SceneResult<Self> {
        desc.validate()?;

        let mut scene = Scene::new();
        for sphere in &desc.spheres {
            if sphere.is_light() {
                scene.add_light(sphere.into())?;
            } else {
                scene.add_surface(sphere.into())?;
            }
        }

        log::debug!(
            "Built scene: {} objects, {} lights",
            scene.len(),
            scene.light_count()
        );

        Ok(scene)
    }

    /// Add an opaque sphere. Fails if its radius is not finite and positive.
    pub fn add_surface(&mut self, sphere: Sphere) -> SceneResult<()> {
        sphere.check_radius(self.len())?;
        self.objects.push(SceneObject::Surface(sphere));
        Ok(())
    }

    /// Add a light. Fails if its radius is not finite and positive.
    pub fn add_light(&mut self, sphere: Sphere) -> SceneResult<()> {
        sphere.check_radius(self.len())?;
        self.objects.push(SceneObject::Light(sphere));
        Ok(())
    }

    /// All objects in insertion order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Lights with their index into `objects()`.
    pub fn lights(&self) -> impl Iterator<Item = (usize, &Sphere)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, obj)| match obj {
                SceneObject::Light(s) => Some((i, s)),
                SceneObject::Surface(_) => None,
            })
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of lights.
    pub fn light_count(&self) -> usize {
        self.lights().count()
    }
}
