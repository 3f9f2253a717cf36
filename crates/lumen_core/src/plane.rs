//! Infinite plane.

use lumen_math::{align_zero, is_zero, unit, Aabb, DVec3, Ray};

use crate::{Geometry, GeometryError};

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: DVec3,
    normal: DVec3,
}

impl Plane {
    /// Create a plane from a point and a (not necessarily unit) normal.
    pub fn new(point: DVec3, normal: DVec3) -> Result<Self, GeometryError> {
        Ok(Self {
            point,
            normal: unit(normal)?,
        })
    }

    /// Create the plane through three points.
    ///
    /// The normal is `(p2 - p1) x (p3 - p1)`, so the winding of the points
    /// decides which side is "front".
    pub fn from_points(p1: DVec3, p2: DVec3, p3: DVec3) -> Result<Self, GeometryError> {
        if p1 == p2 {
            return Err(GeometryError::CoincidentVertices { index: 1 });
        }
        if p2 == p3 || p1 == p3 {
            return Err(GeometryError::CoincidentVertices { index: 2 });
        }
        let normal = unit((p2 - p1).cross(p3 - p1))
            .map_err(|_| GeometryError::CollinearVertices { index: 2 })?;
        Ok(Self { point: p1, normal })
    }

    pub fn point(&self) -> DVec3 {
        self.point
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }
}

impl Geometry for Plane {
    fn intersect_params(&self, ray: &Ray) -> Vec<f64> {
        // A head lying on the reference point has no usable (Q - O)
        if ray.head == self.point {
            return Vec::new();
        }
        let nv = self.normal.dot(ray.direction);
        if is_zero(nv) {
            return Vec::new();
        }
        let t = align_zero(self.normal.dot(self.point - ray.head) / nv);
        if t <= 0.0 {
            Vec::new()
        } else {
            vec![t]
        }
    }

    fn normal_at(&self, _point: DVec3) -> DVec3 {
        self.normal
    }

    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_plane_from_points_normal() {
        let plane = Plane::from_points(
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        // (2, 1, 2) / 3, up to orientation
        let expected = DVec3::new(2.0, 1.0, 2.0) / 3.0;
        let n = plane.normal_at(DVec3::ZERO);
        assert!(approx(n, expected) || approx(n, -expected));
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_plane_degenerate_points() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(
            Plane::from_points(a, a, DVec3::ZERO),
            Err(GeometryError::CoincidentVertices { index: 1 })
        );
        assert_eq!(
            Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0)),
            Err(GeometryError::CollinearVertices { index: 2 })
        );
        assert!(Plane::new(DVec3::ZERO, DVec3::ZERO).is_err());
    }

    #[test]
    fn test_plane_intersections() {
        let plane = Plane::new(DVec3::new(0.0, 0.0, 1.0), DVec3::Z).unwrap();

        // Crossing
        let ray = Ray::new(DVec3::new(1.0, 1.0, 0.0), DVec3::new(0.0, 1.0, 1.0)).unwrap();
        let t = plane.intersect_params(&ray);
        assert_eq!(t.len(), 1);
        assert!(approx(ray.at(t[0]), DVec3::new(1.0, 2.0, 1.0)));

        // Pointing away
        let ray = Ray::new(DVec3::new(1.0, 1.0, 0.0), DVec3::new(0.0, 1.0, -1.0)).unwrap();
        assert!(plane.intersect_params(&ray).is_empty());

        // Parallel, off plane and in plane
        let ray = Ray::new(DVec3::new(0.0, 0.0, 3.0), DVec3::X).unwrap();
        assert!(plane.intersect_params(&ray).is_empty());
        let ray = Ray::new(DVec3::new(4.0, 0.0, 1.0), DVec3::X).unwrap();
        assert!(plane.intersect_params(&ray).is_empty());

        // Head on the plane
        let ray = Ray::new(DVec3::new(3.0, 0.0, 1.0), DVec3::Z).unwrap();
        assert!(plane.intersect_params(&ray).is_empty());
        let ray = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::Z).unwrap();
        assert!(plane.intersect_params(&ray).is_empty());
    }
}
