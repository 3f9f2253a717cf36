//! Recursive Whitted-style ray tracer.
//!
//! Shading at a hit is the local Phong term from every light, attenuated by
//! the transparency of whatever lies between the hit and the light, plus
//! reflected and refracted contributions traced recursively. Recursion stops
//! when the level budget runs out or the accumulated coefficient drops below
//! `min_k`.

use lumen_core::{Color, GeoPoint, Light, Material, Scene};
use lumen_math::{align_zero, is_zero, DVec3, Ray};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::TargetArea;

/// Maps a ray to the color it sees.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;
}

/// Recursion and sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerSettings {
    /// Recursion budget for the top-level hit; 1 means local shading only
    pub max_level: u32,
    /// Contributions whose accumulated coefficient falls below this are dropped
    pub min_k: f64,
    /// Side of the sampling grid for glossy and blurred rays
    pub glossy_density: usize,
    /// Side of the shadow ray grid for lights with a radius
    pub shadow_density: usize,
}

impl Default for TracerSettings {
    fn default() -> Self {
        Self {
            max_level: 10,
            min_k: 0.001,
            glossy_density: 5,
            shadow_density: 4,
        }
    }
}

/// Ray tracer over a frozen [`Scene`].
pub struct SimpleRayTracer {
    scene: Scene,
    settings: TracerSettings,
}

impl SimpleRayTracer {
    pub fn new(scene: Scene) -> Self {
        Self::with_settings(scene, TracerSettings::default())
    }

    pub fn with_settings(scene: Scene, settings: TracerSettings) -> Self {
        Self { scene, settings }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn settings(&self) -> &TracerSettings {
        &self.settings
    }

    fn calc_color(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: Color) -> Color {
        let color = self.local_effects(gp, ray, k);
        if level <= 1 {
            color
        } else {
            color + self.global_effects(gp, ray, level, k)
        }
    }

    fn local_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, k: Color) -> Color {
        let emission = gp.surface.emission();
        let n = gp.normal();
        let v = ray.direction;
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return emission;
        }

        let material = gp.surface.material();
        let mut color = emission;
        for light in self.scene.lights() {
            let Some(l) = light.direction_to(gp.point) else {
                continue;
            };
            let nl = align_zero(n.dot(l));
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(gp.point, light, l, n);
            if (ktr * k).max_element() < self.settings.min_k {
                continue;
            }

            let il = light.intensity_at(gp.point) * ktr;
            color += il * (diffusive(material, nl) + specular(material, n, l, nl, v));
        }
        color
    }

    /// Fraction of the light reaching `point`, per channel.
    fn transparency(&self, point: DVec3, light: &Light, l: DVec3, n: DVec3) -> Color {
        let Ok(shadow_ray) = Ray::offset(point, -l, n) else {
            return Color::ONE;
        };
        let distance = light.distance(shadow_ray.head);

        let radius = light.radius();
        if radius > 0.0 {
            if let Some(ktr) = self.soft_transparency(&shadow_ray, n, radius, distance) {
                return ktr;
            }
        }
        self.transmitted(&shadow_ray, distance)
    }

    /// Average transparency over a grid of shadow rays aimed at a square of
    /// side `2 * radius` around the light.
    fn soft_transparency(
        &self,
        shadow_ray: &Ray,
        n: DVec3,
        radius: f64,
        distance: f64,
    ) -> Option<Color> {
        let area = TargetArea::builder()
            .from_ray(shadow_ray)
            .view_plane_size(2.0 * radius, 2.0 * radius)
            .view_plane_distance(distance)
            .density(self.settings.shadow_density)
            .build()
            .ok()?;

        let side = n.dot(shadow_ray.direction);
        let mut total = Color::ZERO;
        let mut count = 0;
        for ray in area.construct_jittered_grid(&mut seeded_rng(shadow_ray)) {
            if align_zero(n.dot(ray.direction) * side) <= 0.0 {
                continue;
            }
            // Distance along this ray to the light plane
            let max_distance = distance / ray.direction.dot(shadow_ray.direction);
            total += self.transmitted(&ray, max_distance);
            count += 1;
        }

        (count > 0).then(|| total / count as f64)
    }

    /// Product of the transparencies of everything `ray` crosses within
    /// `max_distance`.
    fn transmitted(&self, ray: &Ray, max_distance: f64) -> Color {
        let mut ktr = Color::ONE;
        for hit in self.scene.geometries().find_intersections_within(ray, max_distance) {
            ktr *= hit.surface.material().kt;
            if ktr.max_element() < self.settings.min_k {
                return Color::ZERO;
            }
        }
        ktr
    }

    fn global_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: Color) -> Color {
        let material = gp.surface.material();
        let n = gp.normal();
        let v = ray.direction;

        let mut color = Color::ZERO;

        let reflected = v - n * (2.0 * n.dot(v));
        if let Ok(reflected) = Ray::offset(gp.point, reflected, n) {
            color += self.global_effect(&reflected, n, material.kg, material.kr, level, k);
        }

        if let Ok(refracted) = Ray::offset(gp.point, v, n) {
            color += self.global_effect(&refracted, n, material.kb, material.kt, level, k);
        }

        color
    }

    fn global_effect(
        &self,
        ideal: &Ray,
        n: DVec3,
        spread: f64,
        kx: Color,
        level: u32,
        k: Color,
    ) -> Color {
        let kkx = k * kx;
        if kkx.max_element() < self.settings.min_k {
            return Color::ZERO;
        }

        let rays = self.sample_rays(ideal, n, spread);
        let mut total = Color::ZERO;
        for ray in &rays {
            total += match self.scene.geometries().find_closest(ray) {
                Some(gp) => self.calc_color(&gp, ray, level - 1, kkx),
                None => self.scene.background(),
            };
        }
        total / rays.len() as f64 * kx
    }

    /// The ideal ray, or a jittered grid around it when `spread` is positive.
    /// Grid rays that cross to the other side of the surface are dropped.
    fn sample_rays(&self, ideal: &Ray, n: DVec3, spread: f64) -> Vec<Ray> {
        if spread <= 0.0 || is_zero(spread) {
            return vec![*ideal];
        }
        let Ok(area) = TargetArea::around_ray(ideal, spread) else {
            return vec![*ideal];
        };

        let side = n.dot(ideal.direction);
        let rays: Vec<Ray> = area
            .with_density(self.settings.glossy_density)
            .construct_jittered_grid(&mut seeded_rng(ideal))
            .into_iter()
            .filter(|ray| align_zero(n.dot(ray.direction) * side) > 0.0)
            .collect();

        if rays.is_empty() {
            vec![*ideal]
        } else {
            rays
        }
    }
}

impl RayTracer for SimpleRayTracer {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.scene.geometries().find_closest(ray) {
            Some(gp) => {
                let level = self.settings.max_level.max(1);
                self.calc_color(&gp, ray, level, Color::ONE) + self.scene.ambient().intensity()
            }
            None => self.scene.background(),
        }
    }
}

fn diffusive(material: &Material, nl: f64) -> Color {
    material.kd * nl.abs()
}

fn specular(material: &Material, n: DVec3, l: DVec3, nl: f64, v: DVec3) -> Color {
    let r = l - n * (2.0 * nl);
    let factor = (-v.dot(r)).max(0.0);
    material.ks * factor.powi(material.shininess)
}

/// RNG seeded from the bits of `ray`, so sampling the same ray twice gives
/// the same grid.
fn seeded_rng(ray: &Ray) -> StdRng {
    // FNV-1a
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    let components = ray.head.to_array().into_iter().chain(ray.direction.to_array());
    for value in components {
        for byte in value.to_bits().to_le_bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
    }
    StdRng::seed_from_u64(hash)
}
