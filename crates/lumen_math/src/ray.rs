use crate::{is_zero, unit, DVec3, MathError};

/// Distance a secondary ray's head is pushed off the surface it leaves.
pub const DELTA: f64 = 0.1;

/// A ray in 3D space with a head (origin) and a unit-length direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub head: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    pub fn new(head: DVec3, direction: DVec3) -> Result<Self, MathError> {
        Ok(Self {
            head,
            direction: unit(direction)?,
        })
    }

    /// Create a ray from a direction that is already unit length.
    ///
    /// Used on hot paths where the direction comes out of an operation that
    /// preserves length (reflection, refraction continuation).
    #[inline]
    pub fn from_unit(head: DVec3, direction: DVec3) -> Self {
        debug_assert!((direction.length() - 1.0).abs() < 1e-6);
        Self { head, direction }
    }

    /// Create a ray leaving a surface.
    ///
    /// The head is moved by [`DELTA`] along `normal`, towards the side of the
    /// surface that `direction` points into. A direction tangent to the
    /// surface leaves the head in place.
    pub fn offset(head: DVec3, direction: DVec3, normal: DVec3) -> Result<Self, MathError> {
        let direction = unit(direction)?;
        let nv = normal.dot(direction);
        let head = if is_zero(nv) {
            head
        } else if nv > 0.0 {
            head + normal * DELTA
        } else {
            head - normal * DELTA
        };
        Ok(Self { head, direction })
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: head + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        if is_zero(t) {
            self.head
        } else {
            self.head + self.direction * t
        }
    }

    /// The point of `points` nearest to the head, if any.
    pub fn closest_point(&self, points: &[DVec3]) -> Option<DVec3> {
        self.closest_by(points, |p| *p).copied()
    }

    /// The item nearest to the head, measuring each item by `point_of`.
    pub fn closest_by<'a, T>(
        &self,
        items: &'a [T],
        point_of: impl Fn(&T) -> DVec3,
    ) -> Option<&'a T> {
        items.iter().min_by(|a, b| {
            let da = self.head.distance_squared(point_of(a));
            let db = self.head.distance_squared(point_of(b));
            da.total_cmp(&db)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, 3.0, 4.0)).unwrap();
        assert_eq!(ray.head, DVec3::new(1.0, 2.0, 3.0));
        assert!((ray.direction - DVec3::new(0.0, 0.6, 0.8)).length() < 1e-12);
    }

    #[test]
    fn test_ray_zero_direction() {
        assert!(Ray::new(DVec3::ZERO, DVec3::ZERO).is_err());
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X).unwrap();

        assert_eq!(ray.at(0.0), DVec3::ZERO);
        assert_eq!(ray.at(1.0), DVec3::X);
        assert_eq!(ray.at(2.0), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_offset_follows_direction_side() {
        let normal = DVec3::Z;

        let up = Ray::offset(DVec3::ZERO, DVec3::new(1.0, 0.0, 1.0), normal).unwrap();
        assert_eq!(up.head, DVec3::new(0.0, 0.0, DELTA));

        let down = Ray::offset(DVec3::ZERO, DVec3::new(1.0, 0.0, -1.0), normal).unwrap();
        assert_eq!(down.head, DVec3::new(0.0, 0.0, -DELTA));

        let tangent = Ray::offset(DVec3::ZERO, DVec3::X, normal).unwrap();
        assert_eq!(tangent.head, DVec3::ZERO);
    }

    #[test]
    fn test_closest_point() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X).unwrap();
        assert_eq!(ray.closest_point(&[]), None);

        let points = [
            DVec3::new(5.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
        ];
        assert_eq!(ray.closest_point(&points), Some(DVec3::new(1.0, 0.0, 0.0)));

        // First and last elements win too
        assert_eq!(ray.closest_point(&points[..1]), Some(points[0]));
        let reversed = [points[0], points[2], points[1]];
        assert_eq!(ray.closest_point(&reversed), Some(points[1]));
    }
}
