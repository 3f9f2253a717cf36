//! Infinite tubes and finite capped cylinders around an axis ray.

use lumen_math::{align_zero, is_zero, Aabb, DVec3, Ray};

use crate::{Geometry, GeometryError, Plane};

/// An infinite cylinder of `radius` around `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        if align_zero(radius) <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { axis, radius })
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed position of `point` along the axis, measured from the axis head.
    fn axial(&self, point: DVec3) -> f64 {
        self.axis.direction.dot(point - self.axis.head)
    }

    /// Ray parameters where the ray crosses the lateral surface.
    ///
    /// Solved on the components perpendicular to the axis. A ray parallel to
    /// the axis never crosses, and a tangent ray counts as a miss.
    fn lateral_params(&self, ray: &Ray) -> Vec<f64> {
        let va = self.axis.direction;
        let dp = ray.head - self.axis.head;
        let v_perp = ray.direction - va * ray.direction.dot(va);
        let dp_perp = dp - va * dp.dot(va);

        let a = v_perp.length_squared();
        if is_zero(a) {
            return Vec::new();
        }
        let b = 2.0 * v_perp.dot(dp_perp);
        let c = dp_perp.length_squared() - self.radius * self.radius;
        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            return Vec::new();
        }

        let root = discriminant.sqrt();
        [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
            .into_iter()
            .map(align_zero)
            .filter(|t| *t > 0.0)
            .collect()
    }
}

impl Geometry for Tube {
    fn intersect_params(&self, ray: &Ray) -> Vec<f64> {
        self.lateral_params(ray)
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        let projected = self.axis.at(self.axial(point));
        let offset = point - projected;
        if is_zero(offset.length()) {
            self.axis.direction
        } else {
            offset.normalize()
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

/// A finite tube closed by two disc caps, at the axis head and at `height`
/// along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
    bottom: Plane,
    top: Plane,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Self, GeometryError> {
        if align_zero(height) <= 0.0 {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        let tube = Tube::new(axis, radius)?;
        let bottom = Plane::new(axis.head, axis.direction)?;
        let top = Plane::new(axis.at(height), axis.direction)?;
        Ok(Self {
            tube,
            height,
            bottom,
            top,
        })
    }

    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    fn cap_params(&self, cap: &Plane, ray: &Ray) -> Vec<f64> {
        let r2 = self.tube.radius * self.tube.radius;
        cap.intersect_params(ray)
            .into_iter()
            .filter(|t| align_zero(ray.at(*t).distance_squared(cap.point()) - r2) < 0.0)
            .collect()
    }
}

impl Geometry for Cylinder {
    fn intersect_params(&self, ray: &Ray) -> Vec<f64> {
        let mut params: Vec<f64> = self
            .tube
            .lateral_params(ray)
            .into_iter()
            .filter(|t| {
                let s = self.tube.axial(ray.at(*t));
                align_zero(s) > 0.0 && align_zero(s - self.height) < 0.0
            })
            .collect();
        params.extend(self.cap_params(&self.bottom, ray));
        params.extend(self.cap_params(&self.top, ray));
        params
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        let s = self.tube.axial(point);
        if is_zero(s) || is_zero(s - self.height) {
            return self.tube.axis.direction;
        }
        self.tube.normal_at(point)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let va = self.tube.axis.direction;
        let r = self.tube.radius;
        // A disc of radius r with normal va spans r * sqrt(1 - va_i^2) on axis i
        let extent = DVec3::new(
            r * (1.0 - va.x * va.x).max(0.0).sqrt(),
            r * (1.0 - va.y * va.y).max(0.0).sqrt(),
            r * (1.0 - va.z * va.z).max(0.0).sqrt(),
        );
        let c0 = self.bottom.point();
        let c1 = self.top.point();
        Some(Aabb::from_points(c0.min(c1) - extent, c0.max(c1) + extent))
    }
}
