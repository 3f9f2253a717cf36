use crate::{is_zero, DVec3, Interval, Ray};

/// Thinnest extent a box may have along any axis.
const MIN_EXTENT: f64 = 0.0001;

/// Axis-aligned bounding box, one [`Interval`] per axis.
///
/// Boxes are never flat: an axis thinner than [`MIN_EXTENT`] is padded so
/// that planar surfaces still have a volume to test rays against.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let pad = |axis: Interval| {
            if axis.size() < MIN_EXTENT {
                axis.expand(MIN_EXTENT)
            } else {
                axis
            }
        };
        Self {
            x: pad(x),
            y: pad(y),
            z: pad(z),
        }
    }

    /// Box spanned by two opposite corners, in any order.
    pub fn from_points(a: DVec3, b: DVec3) -> Self {
        let (lo, hi) = (a.min(b), a.max(b));
        Self::new(
            Interval::new(lo.x, hi.x),
            Interval::new(lo.y, hi.y),
            Interval::new(lo.z, hi.z),
        )
    }

    /// The smallest box containing every point; `None` for no points.
    pub fn enclosing(points: &[DVec3]) -> Option<Self> {
        let first = *points.first()?;
        let (lo, hi) = points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self::from_points(lo, hi))
    }

    /// The smallest box containing both.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: a.x.hull(&b.x),
            y: a.y.hull(&b.y),
            z: a.z.hull(&b.z),
        }
    }

    pub fn min(&self) -> DVec3 {
        DVec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> DVec3 {
        DVec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Interval along axis 0 (X), 1 (Y) or 2 (Z).
    pub fn axis_interval(&self, axis: usize) -> Interval {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &Aabb) -> bool {
        self.min().cmple(other.min()).all() && other.max().cmple(self.max()).all()
    }

    /// Whether `ray` enters the box for some parameter in `ray_t`.
    ///
    /// Slab method: the running interval is narrowed by the X, Y, then Z slab
    /// and the test fails as soon as it becomes empty. An axis the ray runs
    /// parallel to never narrows the interval; it only rejects when the head
    /// sits outside that slab.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let origin = ray.head[axis];
            let dir = ray.direction[axis];

            if is_zero(dir) {
                if !slab.contains(origin) {
                    return false;
                }
                continue;
            }

            let t0 = (slab.min - origin) / dir;
            let t1 = (slab.max - origin) / dir;
            ray_t = ray_t.intersect(&Interval::new(t0.min(t1), t0.max(t1)));
            if ray_t.is_empty() {
                return false;
            }
        }
        true
    }

    /// Slab test over the whole forward half of the ray.
    pub fn has_intersection(&self, ray: &Ray) -> bool {
        self.hit(ray, Interval::FORWARD)
    }

    pub fn centroid(&self) -> DVec3 {
        DVec3::new(self.x.center(), self.y.center(), self.z.center())
    }
}
