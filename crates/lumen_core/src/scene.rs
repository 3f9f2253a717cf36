//! Scene graph types for Lumen.
//!
//! A [`SceneBuilder`] collects geometry and lights; [`SceneBuilder::build`]
//! freezes them into a read-only [`Scene`] that can be shared between
//! render threads.

use crate::{AmbientLight, Color, Geometries, Intersectable, Light};

/// A frozen scene, ready to render.
pub struct Scene {
    name: String,
    background: Color,
    ambient: AmbientLight,
    geometries: Box<dyn Intersectable>,
    lights: Vec<Light>,
}

impl Scene {
    /// Start a new scene.
    pub fn builder(name: impl Into<String>) -> SceneBuilder {
        SceneBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient(&self) -> &AmbientLight {
        &self.ambient
    }

    pub fn geometries(&self) -> &dyn Intersectable {
        self.geometries.as_ref()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }
}

/// Mutable scene under construction.
pub struct SceneBuilder {
    name: String,
    background: Color,
    ambient: AmbientLight,
    geometries: Geometries,
    lights: Vec<Light>,
    use_bvh: bool,
}

impl SceneBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::ZERO,
            ambient: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
            use_bvh: true,
        }
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn ambient(mut self, ambient: AmbientLight) -> Self {
        self.ambient = ambient;
        self
    }

    /// Add a surface or a nested aggregate.
    pub fn geometry(mut self, geometry: impl Intersectable + 'static) -> Self {
        self.geometries.add(geometry);
        self
    }

    pub fn light(mut self, light: impl Into<Light>) -> Self {
        self.lights.push(light.into());
        self
    }

    /// Whether `build` wraps the geometry in a BVH (default: true).
    pub fn use_bvh(mut self, use_bvh: bool) -> Self {
        self.use_bvh = use_bvh;
        self
    }

    /// Freeze the scene.
    pub fn build(self) -> Scene {
        if self.geometries.is_empty() {
            log::warn!("Scene '{}' has no geometry", self.name);
        }
        log::info!(
            "Scene '{}': {} objects, {} lights",
            self.name,
            self.geometries.len(),
            self.lights.len()
        );

        let geometries: Box<dyn Intersectable> = if self.use_bvh {
            Box::new(self.geometries.build_bvh())
        } else {
            Box::new(self.geometries)
        };

        Scene {
            name: self.name,
            background: self.background,
            ambient: self.ambient,
            geometries,
            lights: self.lights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PointLight, Sphere, Surface};
    use lumen_math::{DVec3, Ray};

    #[test]
    fn test_scene_builder() {
        let scene = Scene::builder("test")
            .background(Color::new(0.1, 0.2, 0.3))
            .ambient(AmbientLight::new(Color::ONE, 0.1))
            .geometry(Surface::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0).unwrap()))
            .light(PointLight::new(Color::ONE, DVec3::new(0.0, 5.0, 0.0)))
            .build();

        assert_eq!(scene.name(), "test");
        assert_eq!(scene.background(), Color::new(0.1, 0.2, 0.3));
        assert_eq!(scene.lights().len(), 1);

        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z).unwrap();
        assert_eq!(scene.geometries().find_intersections(&ray).len(), 2);
    }

    #[test]
    fn test_scene_flat_and_bvh_agree() {
        let build = |use_bvh| {
            Scene::builder("spheres")
                .geometry(Surface::new(Sphere::new(DVec3::new(-2.0, 0.0, -5.0), 1.0).unwrap()))
                .geometry(Surface::new(Sphere::new(DVec3::new(2.0, 0.0, -5.0), 1.0).unwrap()))
                .use_bvh(use_bvh)
                .build()
        };
        let flat = build(false);
        let bvh = build(true);

        for x in [-2.0, 0.0, 2.0] {
            let ray = Ray::new(DVec3::new(x, 0.0, 0.0), DVec3::NEG_Z).unwrap();
            assert_eq!(
                flat.geometries().find_points(&ray).len(),
                bvh.geometries().find_points(&ray).len()
            );
        }
    }
}
