//! The closed set of primitive shapes.

use lumen_math::{Aabb, DVec3, Ray};

use crate::{Cylinder, Plane, Polygon, Sphere, Triangle, Tube};

/// Pure geometric queries shared by every primitive.
pub trait Geometry: Send + Sync {
    /// Ray parameters (distances from the head) of every crossing strictly
    /// in front of the head. Order is unspecified.
    fn intersect_params(&self, ray: &Ray) -> Vec<f64>;

    /// Unit surface normal at a point on the surface.
    fn normal_at(&self, point: DVec3) -> DVec3;

    /// Finite extent of the shape, or `None` when it is unbounded.
    fn bounding_box(&self) -> Option<Aabb>;
}

/// A primitive shape. See the individual types for their tie-break rules.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Shape {
    fn as_geometry(&self) -> &dyn Geometry {
        match self {
            Shape::Plane(s) => s,
            Shape::Sphere(s) => s,
            Shape::Triangle(s) => s,
            Shape::Polygon(s) => s,
            Shape::Tube(s) => s,
            Shape::Cylinder(s) => s,
        }
    }
}

impl Geometry for Shape {
    fn intersect_params(&self, ray: &Ray) -> Vec<f64> {
        self.as_geometry().intersect_params(ray)
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        self.as_geometry().normal_at(point)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.as_geometry().bounding_box()
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape!(Plane, Sphere, Triangle, Polygon, Tube, Cylinder);
