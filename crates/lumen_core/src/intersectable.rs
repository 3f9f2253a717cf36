//! Intersectable trait and the flat `Geometries` aggregate.

use lumen_math::{Aabb, DVec3, Interval, Ray};

use crate::{Bvh, GeoPoint};

/// Trait for anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// Append every hit no farther than `max_distance` from the ray head.
    fn collect_intersections<'a>(
        &'a self,
        ray: &Ray,
        max_distance: f64,
        out: &mut Vec<GeoPoint<'a>>,
    );

    /// Finite extent, or `None` if unbounded. Unbounded objects are never
    /// pruned by bounding box tests.
    fn bounding_box(&self) -> Option<Aabb>;

    /// All hits in front of the ray head, in no particular order.
    fn find_intersections<'a>(&'a self, ray: &Ray) -> Vec<GeoPoint<'a>> {
        self.find_intersections_within(ray, f64::INFINITY)
    }

    /// All hits no farther than `max_distance` from the ray head.
    fn find_intersections_within<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'a>> {
        let mut out = Vec::new();
        self.collect_intersections(ray, max_distance, &mut out);
        out
    }

    /// Hit locations only.
    fn find_points(&self, ray: &Ray) -> Vec<DVec3> {
        self.find_intersections(ray)
            .into_iter()
            .map(|gp| gp.point)
            .collect()
    }

    /// The hit nearest to the ray head.
    fn find_closest<'a>(&'a self, ray: &Ray) -> Option<GeoPoint<'a>> {
        let hits = self.find_intersections(ray);
        ray.closest_by(&hits, |gp| gp.point).copied()
    }
}

/// True if a ray segment can reach anything inside `bbox`. Unbounded
/// objects always pass.
#[inline]
pub(crate) fn may_hit(bbox: Option<&Aabb>, ray: &Ray, max_distance: f64) -> bool {
    bbox.map_or(true, |b| b.hit(ray, Interval::new(0.0, max_distance)))
}

/// A growable list of intersectable objects.
///
/// Caches the union of its children's boxes so that a whole group can be
/// skipped with a single slab test.
pub struct Geometries {
    objects: Vec<Box<dyn Intersectable>>,
    bbox: Option<Aabb>,
    unbounded: bool,
}

impl Geometries {
    /// Create a new empty aggregate.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: None,
            unbounded: false,
        }
    }

    /// Add an object to the aggregate.
    pub fn add(&mut self, object: impl Intersectable + 'static) {
        self.add_boxed(Box::new(object));
    }

    pub fn add_boxed(&mut self, object: Box<dyn Intersectable>) {
        match object.bounding_box() {
            Some(b) => {
                self.bbox = Some(match self.bbox {
                    Some(acc) => Aabb::surrounding(&acc, &b),
                    None => b,
                });
            }
            None => self.unbounded = true,
        }
        self.objects.push(object);
    }

    /// Get the number of direct children.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the aggregate is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Freeze the aggregate into a bounding volume hierarchy.
    pub fn build_bvh(self) -> Bvh {
        Bvh::new(self.objects)
    }
}

impl Default for Geometries {
    fn default() -> Self {
        Self::new()
    }
}

impl Intersectable for Geometries {
    fn collect_intersections<'a>(
        &'a self,
        ray: &Ray,
        max_distance: f64,
        out: &mut Vec<GeoPoint<'a>>,
    ) {
        if !may_hit(self.bounding_box().as_ref(), ray, max_distance) {
            return;
        }
        for object in &self.objects {
            object.collect_intersections(ray, max_distance, out);
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        if self.unbounded {
            None
        } else {
            self.bbox
        }
    }
}
