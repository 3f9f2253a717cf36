//! Sphere primitive for ray tracing.

use lumen_math::{align_zero, Aabb, DVec3, Ray};

use crate::{Geometry, GeometryError};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: DVec3, radius: f64) -> Result<Self, GeometryError> {
        if align_zero(radius) <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Geometry for Sphere {
    fn intersect_params(&self, ray: &Ray) -> Vec<f64> {
        if ray.head == self.center {
            return vec![self.radius];
        }

        let u = self.center - ray.head;
        let tm = ray.direction.dot(u);
        let d = (u.length_squared() - tm * tm).max(0.0).sqrt();

        // Line misses or only grazes the sphere
        if align_zero(d - self.radius) >= 0.0 {
            return Vec::new();
        }

        let th = (self.radius * self.radius - d * d).sqrt();
        [tm - th, tm + th]
            .into_iter()
            .map(align_zero)
            .filter(|t| *t > 0.0)
            .collect()
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        (point - self.center) / self.radius
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let rvec = DVec3::splat(self.radius);
        Some(Aabb::from_points(self.center - rvec, self.center + rvec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(DVec3::new(1.0, 0.0, 0.0), 1.0).unwrap()
    }

    fn hits(sphere: &Sphere, head: DVec3, dir: DVec3) -> Vec<DVec3> {
        let ray = Ray::new(head, dir).unwrap();
        let mut t = sphere.intersect_params(&ray);
        t.sort_by(f64::total_cmp);
        t.into_iter().map(|t| ray.at(t)).collect()
    }

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_sphere_rejects_bad_radius() {
        assert!(Sphere::new(DVec3::ZERO, 0.0).is_err());
        assert!(Sphere::new(DVec3::ZERO, -2.0).is_err());
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0).unwrap();
        assert_eq!(sphere.normal_at(DVec3::X), DVec3::X);

        let sphere = Sphere::new(DVec3::ZERO, 2.0).unwrap();
        let n = sphere.normal_at(DVec3::new(0.0, -2.0, 0.0));
        assert!(approx(n, DVec3::NEG_Y));
    }

    #[test]
    fn test_sphere_crossing_ray() {
        let result = hits(&unit_sphere(), DVec3::new(-1.0, 0.0, 0.0), DVec3::new(3.0, 1.0, 0.0));
        assert_eq!(result.len(), 2);
        assert!(approx(result[0], DVec3::new(0.0651530771650466, 0.355051025721682, 0.0)));
        assert!(approx(result[1], DVec3::new(1.53484692283495, 0.844948974278318, 0.0)));
    }

    #[test]
    fn test_sphere_line_outside() {
        let result = hits(&unit_sphere(), DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 1.0, 0.0));
        assert!(result.is_empty());
    }

    #[test]
    fn test_sphere_head_inside() {
        let result = hits(&unit_sphere(), DVec3::new(0.5, 0.0, 0.0), DVec3::new(0.5, 1.0, 0.0));
        assert_eq!(result.len(), 1);
        assert!(approx(result[0], DVec3::new(1.0, 1.0, 0.0)));

        let result = hits(&unit_sphere(), DVec3::new(1.0, 0.5, 0.0), DVec3::Y);
        assert_eq!(result.len(), 1);
        assert!(approx(result[0], DVec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_sphere_head_at_center() {
        let result = hits(&unit_sphere(), DVec3::new(1.0, 0.0, 0.0), DVec3::Y);
        assert_eq!(result, vec![DVec3::new(1.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_sphere_through_center() {
        let result = hits(&unit_sphere(), DVec3::new(1.0, -2.0, 0.0), DVec3::Y);
        assert_eq!(result.len(), 2);
        assert!(approx(result[0], DVec3::new(1.0, -1.0, 0.0)));
        assert!(approx(result[1], DVec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_sphere_head_on_surface() {
        // Going in
        let result = hits(&unit_sphere(), DVec3::new(1.0, -1.0, 0.0), DVec3::Y);
        assert_eq!(result.len(), 1);
        assert!(approx(result[0], DVec3::new(1.0, 1.0, 0.0)));

        // Going out
        assert!(hits(&unit_sphere(), DVec3::new(1.0, 1.0, 0.0), DVec3::Y).is_empty());
    }

    #[test]
    fn test_sphere_after_and_tangent() {
        let sphere = unit_sphere();
        assert!(hits(&sphere, DVec3::new(1.0, 2.0, 0.0), DVec3::Y).is_empty());

        // Tangent at (1, 0, 1): before, at and after the touching point
        let dir = DVec3::new(1.0, 1.0, 0.0);
        assert!(hits(&sphere, DVec3::new(0.0, -1.0, 1.0), dir).is_empty());
        assert!(hits(&sphere, DVec3::new(1.0, 0.0, 1.0), dir).is_empty());
        assert!(hits(&sphere, DVec3::new(2.0, 1.0, 1.0), dir).is_empty());

        // Outside and orthogonal to the line to the center
        assert!(hits(&sphere, DVec3::new(0.0, 2.0, 0.0), DVec3::Z).is_empty());
    }

    #[test]
    fn test_sphere_hits_lie_on_surface() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let sphere = Sphere::new(DVec3::new(0.5, -1.0, 2.0), 1.5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let head = DVec3::new(
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-4.0..4.0),
            );
            let dir = DVec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let Ok(ray) = Ray::new(head, dir) else { continue };
            let t = sphere.intersect_params(&ray);
            assert!(t.len() <= 2);
            for t in t {
                let r = ray.at(t).distance(sphere.center());
                assert!((r - sphere.radius()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_sphere_bounding_box() {
        let bbox = unit_sphere().bounding_box().unwrap();
        assert_eq!(bbox.min(), DVec3::new(0.0, -1.0, -1.0));
        assert_eq!(bbox.max(), DVec3::new(2.0, 1.0, 1.0));
    }
}
