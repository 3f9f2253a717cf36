//! Convex planar polygons and triangles.

use lumen_math::{is_zero, Aabb, DVec3, Ray};

use crate::{Geometry, GeometryError, Plane};

/// A convex, planar polygon with at least three vertices.
///
/// Vertices must be given in boundary order (either winding). The
/// supporting plane is derived from the first three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<DVec3>,
    plane: Plane,
    bbox: Aabb,
}

impl Polygon {
    /// Create a polygon, validating planarity and convexity.
    pub fn new(vertices: Vec<DVec3>) -> Result<Self, GeometryError> {
        let polygon = Self::unchecked(vertices)?;
        polygon.validate()?;
        Ok(polygon)
    }

    /// Builds the plane and box only; three points are always planar and
    /// convex once the plane exists.
    fn unchecked(vertices: Vec<DVec3>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let bbox = Aabb::enclosing(&vertices).ok_or(GeometryError::TooFewVertices { count: 0 })?;
        Ok(Self {
            vertices,
            plane,
            bbox,
        })
    }

    fn validate(&self) -> Result<(), GeometryError> {
        let n = self.plane.normal();
        let count = self.vertices.len();

        if let Some(index) =
            (3..count).find(|&i| !is_zero((self.vertices[i] - self.vertices[0]).dot(n)))
        {
            return Err(GeometryError::NonCoplanarVertices { index });
        }

        // Walk every (incoming edge, outgoing edge) pair, starting with the
        // corner at vertex 0.
        let edge = |i: usize| self.vertices[i] - self.vertices[(i + count - 1) % count];
        let mut positive = None;
        for i in 0..count {
            let incoming = edge(i);
            if incoming == DVec3::ZERO {
                return Err(GeometryError::CoincidentVertices { index: i });
            }
            let outgoing = edge((i + 1) % count);
            if outgoing == DVec3::ZERO {
                return Err(GeometryError::CoincidentVertices {
                    index: (i + 1) % count,
                });
            }

            let turn = incoming.cross(outgoing);
            if is_zero(turn.length()) {
                return Err(GeometryError::CollinearVertices { index: i });
            }
            let side = turn.dot(n) > 0.0;
            match positive {
                None => positive = Some(side),
                Some(expected) if expected != side => {
                    return Err(GeometryError::NonConvex { index: i });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Average of the vertices; strictly inside any convex polygon.
    pub fn centroid(&self) -> DVec3 {
        self.vertices.iter().copied().sum::<DVec3>() / self.vertices.len() as f64
    }
}

impl Geometry for Polygon {
    fn intersect_params(&self, ray: &Ray) -> Vec<f64> {
        let t = self.plane.intersect_params(ray);
        if t.is_empty() {
            return t;
        }

        // The hit is inside iff the ray direction sees every edge (as a
        // triangle fan from the head) from the same side.
        let count = self.vertices.len();
        let mut sign = 0.0_f64;
        for i in 0..count {
            let a = self.vertices[i] - ray.head;
            let b = self.vertices[(i + 1) % count] - ray.head;
            let edge_normal = a.cross(b);
            let length = edge_normal.length();
            if is_zero(length) {
                return Vec::new();
            }
            let projection = ray.direction.dot(edge_normal / length);
            if is_zero(projection) {
                return Vec::new();
            }
            if sign == 0.0 {
                sign = projection.signum();
            } else if sign != projection.signum() {
                return Vec::new();
            }
        }
        t
    }

    fn normal_at(&self, _point: DVec3) -> DVec3 {
        self.plane.normal()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

/// A triangle: a three vertex [`Polygon`] that skips the convexity checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle(Polygon);

impl Triangle {
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Result<Self, GeometryError> {
        Polygon::unchecked(vec![a, b, c]).map(Triangle)
    }

    pub fn as_polygon(&self) -> &Polygon {
        &self.0
    }
}

impl Geometry for Triangle {
    fn intersect_params(&self, ray: &Ray) -> Vec<f64> {
        self.0.intersect_params(ray)
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        self.0.normal_at(point)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.0.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    fn points(shape: &impl Geometry, head: DVec3, dir: DVec3) -> Vec<DVec3> {
        let ray = Ray::new(head, dir).unwrap();
        shape
            .intersect_params(&ray)
            .into_iter()
            .map(|t| ray.at(t))
            .collect()
    }

    fn square() -> Polygon {
        Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(-1.0, 1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_polygon_valid() {
        let polygon = square();
        let n = polygon.normal_at(DVec3::ZERO);
        let expected = DVec3::splat(1.0 / 3f64.sqrt());
        assert!(approx(n, expected) || approx(n, -expected));
        assert_eq!(polygon.vertices().len(), 4);
    }

    #[test]
    fn test_polygon_too_few_vertices() {
        let result = Polygon::new(vec![DVec3::ZERO, DVec3::X]);
        assert_eq!(result, Err(GeometryError::TooFewVertices { count: 2 }));
    }

    #[test]
    fn test_polygon_wrong_order() {
        let result = Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(-1.0, 1.0, 1.0),
        ]);
        assert!(matches!(result, Err(GeometryError::NonConvex { .. })));
    }

    #[test]
    fn test_polygon_not_coplanar() {
        let result = Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 2.0, 2.0),
        ]);
        assert_eq!(result, Err(GeometryError::NonCoplanarVertices { index: 3 }));
    }

    #[test]
    fn test_polygon_concave() {
        let result = Polygon::new(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(2.0, 2.0, 0.0),
            DVec3::new(1.0, 0.5, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        ]);
        assert!(matches!(result, Err(GeometryError::NonConvex { .. })));
    }

    #[test]
    fn test_polygon_degenerate_vertices() {
        // Consecutive duplicate
        let result = Polygon::new(vec![
            DVec3::ZERO,
            DVec3::X,
            DVec3::Y,
            DVec3::Y,
        ]);
        assert_eq!(result, Err(GeometryError::CoincidentVertices { index: 3 }));

        // Vertex on the line through its neighbours
        let result = Polygon::new(vec![
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.5, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(result, Err(GeometryError::CollinearVertices { index: 3 }));
    }

    #[test]
    fn test_polygon_centroid_hit() {
        let polygon = square();
        let n = polygon.normal_at(DVec3::ZERO);
        let c = polygon.centroid();

        let result = points(&polygon, c + n * 2.0, -n);
        assert_eq!(result.len(), 1);
        assert!(approx(result[0], c));

        // From the back side as well
        let result = points(&polygon, c - n * 2.0, n);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_polygon_outside_hull_in_plane() {
        let polygon = square();
        let n = polygon.normal_at(DVec3::ZERO);
        // On the supporting plane x + y + z = 1, beyond vertex (1, 0, 0)
        let outside = DVec3::new(2.0, -0.5, -0.5);
        assert!(points(&polygon, outside + n, -n).is_empty());
    }

    #[test]
    fn test_polygon_edge_and_vertex_graze() {
        let polygon = square();
        let n = polygon.normal_at(DVec3::ZERO);

        let on_edge = (polygon.vertices()[0] + polygon.vertices()[1]) * 0.5;
        assert!(points(&polygon, on_edge + n, -n).is_empty());

        let on_vertex = polygon.vertices()[2];
        assert!(points(&polygon, on_vertex + n, -n).is_empty());

        // On the line extending an edge
        let on_extension = polygon.vertices()[1] * 2.0 - polygon.vertices()[0];
        assert!(points(&polygon, on_extension + n, -n).is_empty());
    }

    #[test]
    fn test_triangle_normal() {
        let triangle = Triangle::new(
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        let n = triangle.normal_at(DVec3::ZERO);
        let expected = DVec3::new(2.0, 1.0, 2.0) / 3.0;
        assert!(approx(n, expected) || approx(n, -expected));
    }

    #[test]
    fn test_triangle_vertical_rays() {
        let triangle = Triangle::new(
            DVec3::new(0.0, 0.0, 4.0),
            DVec3::new(4.0, 0.0, 0.0),
            DVec3::new(0.0, -4.0, 0.0),
        )
        .unwrap();

        // Supporting plane is x - y + z = 4
        let result = points(&triangle, DVec3::new(1.0, -1.0, 3.0), DVec3::NEG_Z);
        assert_eq!(result.len(), 1);
        assert!(approx(result[0], DVec3::new(1.0, -1.0, 2.0)));

        let result = points(&triangle, DVec3::new(1.0, -1.0, 3.0), DVec3::Z);
        assert!(result.is_empty());
    }

    #[test]
    fn test_triangle_outside() {
        let triangle = Triangle::new(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        )
        .unwrap();

        // Inside
        assert_eq!(points(&triangle, DVec3::new(0.5, 0.5, 1.0), DVec3::NEG_Z).len(), 1);
        // Beyond the hypotenuse, then beyond the corner at the origin
        assert!(points(&triangle, DVec3::new(2.0, 2.0, 1.0), DVec3::NEG_Z).is_empty());
        assert!(points(&triangle, DVec3::new(-1.0, -1.0, 1.0), DVec3::NEG_Z).is_empty());
        // On an edge
        assert!(points(&triangle, DVec3::new(1.0, 0.0, 1.0), DVec3::NEG_Z).is_empty());
    }

    #[test]
    fn test_triangle_degenerate() {
        assert!(Triangle::new(DVec3::ZERO, DVec3::X, DVec3::new(3.0, 0.0, 0.0)).is_err());
        assert!(Triangle::new(DVec3::ZERO, DVec3::ZERO, DVec3::Y).is_err());
    }
}
