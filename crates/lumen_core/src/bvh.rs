//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Built once from a frozen set of objects. Objects without a bounding box
//! stay flat at the top level and are always tested; everything else goes
//! into a binary tree split at the median of the box centers' X coordinate.
//!
//! The split axis is always X. Choosing the widest axis per node would give
//! tighter trees, but the results are identical either way.

use lumen_math::{Aabb, Ray};

use crate::intersectable::may_hit;
use crate::{GeoPoint, Intersectable};

/// BVH node - either a branch with two children or a single object.
enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node wrapping one bounded object.
    Leaf {
        object: Box<dyn Intersectable>,
        bbox: Aabb,
    },
}

impl BvhNode {
    /// Recursive median split on the X axis.
    fn build(mut objects: Vec<(Aabb, Box<dyn Intersectable>)>) -> Self {
        if objects.len() == 1 {
            let (bbox, object) = objects.remove(0);
            return BvhNode::Leaf { object, bbox };
        }

        objects.sort_by(|(a, _), (b, _)| a.centroid().x.total_cmp(&b.centroid().x));

        // Split at midpoint
        let mid = objects.len() / 2;
        let right_objects = objects.split_off(mid);
        let left = Self::build(objects);
        let right = Self::build(right_objects);

        let bbox = Aabb::surrounding(&left.bbox(), &right.bbox());
        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    fn bbox(&self) -> Aabb {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => *bbox,
        }
    }

    fn depth(&self) -> usize {
        match self {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn collect<'a>(&'a self, ray: &Ray, max_distance: f64, out: &mut Vec<GeoPoint<'a>>) {
        if !may_hit(Some(&self.bbox()), ray, max_distance) {
            return;
        }
        match self {
            BvhNode::Leaf { object, .. } => object.collect_intersections(ray, max_distance, out),
            BvhNode::Branch { left, right, .. } => {
                left.collect(ray, max_distance, out);
                right.collect(ray, max_distance, out);
            }
        }
    }
}

/// An immutable hierarchy built from a [`Geometries`](crate::Geometries).
pub struct Bvh {
    unbounded: Vec<Box<dyn Intersectable>>,
    root: Option<BvhNode>,
    bounded_count: usize,
}

impl Bvh {
    /// Build a hierarchy over `objects`.
    pub fn new(objects: Vec<Box<dyn Intersectable>>) -> Self {
        let mut unbounded = Vec::new();
        let mut bounded = Vec::new();
        for object in objects {
            match object.bounding_box() {
                Some(bbox) => bounded.push((bbox, object)),
                None => unbounded.push(object),
            }
        }

        let bounded_count = bounded.len();
        let root = if bounded.is_empty() {
            None
        } else {
            Some(BvhNode::build(bounded))
        };

        let bvh = Self {
            unbounded,
            root,
            bounded_count,
        };
        log::info!(
            "Built BVH: {} bounded objects (depth {}), {} unbounded",
            bvh.bounded_count,
            bvh.depth(),
            bvh.unbounded.len()
        );
        bvh
    }

    /// Depth of the tree of bounded objects (0 when there are none).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, BvhNode::depth)
    }

    pub fn bounded_len(&self) -> usize {
        self.bounded_count
    }

    pub fn unbounded_len(&self) -> usize {
        self.unbounded.len()
    }
}

impl Intersectable for Bvh {
    fn collect_intersections<'a>(
        &'a self,
        ray: &Ray,
        max_distance: f64,
        out: &mut Vec<GeoPoint<'a>>,
    ) {
        for object in &self.unbounded {
            object.collect_intersections(ray, max_distance, out);
        }
        if let Some(root) = &self.root {
            root.collect(ray, max_distance, out);
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        if self.unbounded.is_empty() {
            self.root.as_ref().map(BvhNode::bbox)
        } else {
            None
        }
    }
}
