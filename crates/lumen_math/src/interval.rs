/// Closed range `[min, max]` of ray parameters or coordinates. Empty when
/// `min > max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The forward half of a ray, `[0, inf)`.
    pub const FORWARD: Interval = Interval::new(0.0, f64::INFINITY);

    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Grow by `delta / 2` at both ends.
    pub fn expand(&self, delta: f64) -> Interval {
        let half = delta / 2.0;
        Interval::new(self.min - half, self.max + half)
    }

    /// Overlap of both ranges, possibly empty.
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Smallest interval covering both.
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }
}
