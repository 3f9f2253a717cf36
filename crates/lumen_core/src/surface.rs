//! Shaded surfaces and the hit points they produce.

use lumen_math::{align_zero, Aabb, DVec3, Ray};

use crate::{Color, Geometry, Intersectable, Material, Shape};

/// A shape with the attributes the shading pipeline reads at a hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    shape: Shape,
    material: Material,
    emission: Color,
}

impl Surface {
    /// Create a black, non-emissive surface.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            material: Material::NONE,
            emission: Color::ZERO,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    pub fn normal_at(&self, point: DVec3) -> DVec3 {
        self.shape.normal_at(point)
    }
}

impl Intersectable for Surface {
    fn collect_intersections<'a>(
        &'a self,
        ray: &Ray,
        max_distance: f64,
        out: &mut Vec<GeoPoint<'a>>,
    ) {
        out.extend(
            self.shape
                .intersect_params(ray)
                .into_iter()
                .filter(|t| align_zero(t - max_distance) <= 0.0)
                .map(|t| GeoPoint {
                    surface: self,
                    point: ray.at(t),
                }),
        );
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.shape.bounding_box()
    }
}

/// A hit location together with the surface that produced it.
#[derive(Debug, Clone, Copy)]
pub struct GeoPoint<'a> {
    pub surface: &'a Surface,
    pub point: DVec3,
}

impl GeoPoint<'_> {
    pub fn normal(&self) -> DVec3 {
        self.surface.normal_at(self.point)
    }
}

/// Same surface instance and exactly the same point.
impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.surface, other.surface) && self.point == other.point
    }
}
