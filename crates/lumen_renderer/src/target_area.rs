//! Ray generation over a rectangular view plane.
//!
//! The same mapping serves primary camera rays (one cell per pixel) and the
//! sampling grids used for anti-aliasing, soft shadows and glossy or blurred
//! secondary rays.

use lumen_math::{is_zero, perpendicular, unit, DVec3, Ray};
use rand::Rng;

use crate::{CameraError, ConfigIssue};

/// Default side of a sampling grid.
pub const DEFAULT_DENSITY: usize = 9;

/// Distance of the sampling plane for areas built around a ray.
pub const SAMPLING_DISTANCE: f64 = 100.0;

/// An orthonormal frame and a view plane in front of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetArea {
    location: DVec3,
    forward: DVec3,
    up: DVec3,
    right: DVec3,
    width: f64,
    height: f64,
    distance: f64,
    density: usize,
}

impl TargetArea {
    pub fn builder() -> TargetAreaBuilder {
        TargetAreaBuilder::default()
    }

    /// A square sampling area of side `size` centred on `ray`, placed
    /// [`SAMPLING_DISTANCE`] along it.
    pub fn around_ray(ray: &Ray, size: f64) -> Result<Self, CameraError> {
        TargetAreaBuilder::default()
            .from_ray(ray)
            .view_plane_size(size, size)
            .view_plane_distance(SAMPLING_DISTANCE)
            .build()
    }

    pub fn with_density(mut self, density: usize) -> Self {
        self.density = density.max(1);
        self
    }

    pub fn location(&self) -> DVec3 {
        self.location
    }

    pub fn forward(&self) -> DVec3 {
        self.forward
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Always `forward x up`.
    pub fn right(&self) -> DVec3 {
        self.right
    }

    pub fn density(&self) -> usize {
        self.density
    }

    /// Point on the view plane at continuous cell coordinates `(x, y)` of an
    /// `nx` by `ny` grid; integer coordinates are cell centers.
    fn plane_point(&self, nx: usize, ny: usize, x: f64, y: f64) -> DVec3 {
        let center = self.location + self.forward * self.distance;
        let rx = self.width / nx as f64;
        let ry = self.height / ny as f64;

        let xj = (x - (nx as f64 - 1.0) / 2.0) * rx;
        let yi = -(y - (ny as f64 - 1.0) / 2.0) * ry;

        let mut point = center;
        if xj != 0.0 {
            point += self.right * xj;
        }
        if yi != 0.0 {
            point += self.up * yi;
        }
        point
    }

    fn ray_through(&self, point: DVec3) -> Ray {
        // The view plane sits a positive distance in front of the location,
        // so this is never the zero vector.
        Ray::from_unit(self.location, (point - self.location).normalize())
    }

    /// Ray through the center of cell `(j, i)` (column, row) of an `nx` by
    /// `ny` grid.
    pub fn construct_ray(&self, nx: usize, ny: usize, j: usize, i: usize) -> Ray {
        self.ray_through(self.plane_point(nx, ny, j as f64, i as f64))
    }

    /// One ray through the center of every cell of a `density` by `density`
    /// grid, row by row.
    pub fn construct_ray_grid(&self) -> Vec<Ray> {
        let n = self.density;
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (j, i)))
            .map(|(j, i)| self.construct_ray(n, n, j, i))
            .collect()
    }

    /// Like [`construct_ray_grid`](Self::construct_ray_grid), with each ray
    /// moved to a random spot inside its cell.
    pub fn construct_jittered_grid(&self, rng: &mut impl Rng) -> Vec<Ray> {
        let n = self.density;
        let mut rays = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let x = j as f64 + rng.gen_range(-0.5..0.5);
                let y = i as f64 + rng.gen_range(-0.5..0.5);
                rays.push(self.ray_through(self.plane_point(n, n, x, y)));
            }
        }
        rays
    }
}

/// Builder for [`TargetArea`]. Nothing is validated until [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct TargetAreaBuilder {
    location: Option<DVec3>,
    direction: Option<(DVec3, DVec3)>,
    size: Option<(f64, f64)>,
    distance: Option<f64>,
    density: usize,
}

impl Default for TargetAreaBuilder {
    fn default() -> Self {
        Self {
            location: None,
            direction: None,
            size: None,
            distance: None,
            density: DEFAULT_DENSITY,
        }
    }
}

impl TargetAreaBuilder {
    pub fn location(mut self, location: DVec3) -> Self {
        self.location = Some(location);
        self
    }

    /// Viewing direction and up vector; they must be orthogonal.
    pub fn direction(mut self, forward: DVec3, up: DVec3) -> Self {
        self.direction = Some((forward, up));
        self
    }

    /// Place the area at the ray head looking along the ray, with some
    /// perpendicular up vector.
    pub fn from_ray(mut self, ray: &Ray) -> Self {
        self.location = Some(ray.head);
        // A ray direction is never zero, so the fallback is unreachable
        let up = perpendicular(ray.direction).unwrap_or(DVec3::ZERO);
        self.direction = Some((ray.direction, up));
        self
    }

    pub fn view_plane_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn view_plane_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn density(mut self, density: usize) -> Self {
        self.density = density;
        self
    }

    pub fn build(self) -> Result<TargetArea, CameraError> {
        self.validate().map_err(CameraError::Invalid)
    }

    /// Check every field, collecting all issues.
    pub(crate) fn validate(self) -> Result<TargetArea, Vec<ConfigIssue>> {
        let mut issues = Vec::new();

        if self.location.is_none() {
            issues.push(ConfigIssue::MissingLocation);
        }

        let frame = match self.direction {
            None => {
                issues.push(ConfigIssue::MissingDirection);
                None
            }
            Some((forward, up)) => match (unit(forward), unit(up)) {
                (Ok(forward), Ok(up)) => {
                    let dot = forward.dot(up);
                    if is_zero(dot) {
                        Some((forward, up))
                    } else {
                        issues.push(ConfigIssue::NotOrthogonal(dot));
                        None
                    }
                }
                _ => {
                    issues.push(ConfigIssue::ZeroDirection);
                    None
                }
            },
        };

        match self.size {
            None => issues.push(ConfigIssue::MissingSize),
            Some((width, height)) => {
                if width.is_nan() || width <= 0.0 {
                    issues.push(ConfigIssue::NonPositiveWidth(width));
                }
                if height.is_nan() || height <= 0.0 {
                    issues.push(ConfigIssue::NonPositiveHeight(height));
                }
            }
        }

        match self.distance {
            None => issues.push(ConfigIssue::MissingDistance),
            Some(d) if d.is_nan() || d <= 0.0 => issues.push(ConfigIssue::NonPositiveDistance(d)),
            Some(_) => {}
        }

        if self.density == 0 {
            issues.push(ConfigIssue::ZeroDensity);
        }

        match (self.location, frame, self.size, self.distance) {
            (Some(location), Some((forward, up)), Some((width, height)), Some(distance))
                if issues.is_empty() =>
            {
                Ok(TargetArea {
                    location,
                    forward,
                    up,
                    right: forward.cross(up).normalize(),
                    width,
                    height,
                    distance,
                    density: self.density,
                })
            }
            _ => Err(issues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    fn area(width: f64, height: f64, distance: f64) -> TargetArea {
        TargetArea::builder()
            .location(DVec3::ZERO)
            .direction(DVec3::NEG_Z, DVec3::Y)
            .view_plane_size(width, height)
            .view_plane_distance(distance)
            .build()
            .unwrap()
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let area = area(3.0, 3.0, 10.0);
        assert!(approx(area.right(), DVec3::X));
        assert!(is_zero(area.right().dot(area.up())));
        assert!(is_zero(area.right().dot(area.forward())));
    }

    #[test]
    fn test_construct_ray_3x3() {
        // 3x3 pixels on a 3x3 view plane at distance 1
        let area = area(3.0, 3.0, 1.0);
        let dir = |j, i| area.construct_ray(3, 3, j, i).direction;

        assert!(approx(dir(1, 1), DVec3::NEG_Z));
        assert!(approx(dir(0, 0), DVec3::new(-1.0, 1.0, -1.0).normalize()));
        assert!(approx(dir(2, 0), DVec3::new(1.0, 1.0, -1.0).normalize()));
        assert!(approx(dir(1, 2), DVec3::new(0.0, -1.0, -1.0).normalize()));
        assert_eq!(area.construct_ray(3, 3, 1, 1).head, DVec3::ZERO);
    }

    #[test]
    fn test_construct_ray_even_grid() {
        // 4x4 pixels on a 4x4 view plane: centers at +-0.5 and +-1.5
        let area = area(4.0, 4.0, 1.0);
        let ray = area.construct_ray(4, 4, 0, 0);
        assert!(approx(ray.direction, DVec3::new(-1.5, 1.5, -1.0).normalize()));
        let ray = area.construct_ray(4, 4, 2, 1);
        assert!(approx(ray.direction, DVec3::new(0.5, 0.5, -1.0).normalize()));
    }

    #[test]
    fn test_ray_grid() {
        let area = area(2.0, 2.0, 1.0).with_density(4);
        let rays = area.construct_ray_grid();
        assert_eq!(rays.len(), 16);
        // Row by row from the top left
        assert!(approx(rays[0].direction, area.construct_ray(4, 4, 0, 0).direction));
        assert!(approx(rays[5].direction, area.construct_ray(4, 4, 1, 1).direction));
    }

    #[test]
    fn test_jittered_grid_stays_in_cells() {
        let area = area(2.0, 2.0, 1.0).with_density(3);
        let mut rng = StdRng::seed_from_u64(5);
        let rays = area.construct_jittered_grid(&mut rng);
        assert_eq!(rays.len(), 9);

        let cell = 2.0 / 3.0;
        for (k, ray) in rays.iter().enumerate() {
            let center = area.construct_ray(3, 3, k % 3, k / 3).direction;
            // Intersect both directions with the view plane z = -1
            let p = ray.direction / -ray.direction.z;
            let c = center / -center.z;
            assert!((p.x - c.x).abs() <= cell / 2.0 + 1e-12);
            assert!((p.y - c.y).abs() <= cell / 2.0 + 1e-12);
        }

        let again = area.construct_jittered_grid(&mut StdRng::seed_from_u64(5));
        assert_eq!(rays, again);
    }

    #[test]
    fn test_around_ray() {
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(1.0, 1.0, 0.0)).unwrap();
        let area = TargetArea::around_ray(&ray, 4.0).unwrap();
        assert_eq!(area.location(), ray.head);
        assert!(is_zero(area.up().dot(ray.direction)));

        // Center cell of an odd grid is the ideal ray itself
        let center = area.with_density(3).construct_ray(3, 3, 1, 1);
        assert!(approx(center.direction, ray.direction));
    }

    #[test]
    fn test_builder_reports_every_issue() {
        let err = TargetArea::builder()
            .direction(DVec3::NEG_Z, DVec3::new(0.0, 1.0, 1.0))
            .view_plane_size(0.0, -2.0)
            .density(0)
            .build()
            .unwrap_err();

        assert_eq!(
            err.issues(),
            &[
                ConfigIssue::MissingLocation,
                ConfigIssue::NotOrthogonal(-1.0 / 2f64.sqrt()),
                ConfigIssue::NonPositiveWidth(0.0),
                ConfigIssue::NonPositiveHeight(-2.0),
                ConfigIssue::MissingDistance,
                ConfigIssue::ZeroDensity,
            ]
        );
    }

    #[test]
    fn test_builder_zero_vectors() {
        let err = TargetArea::builder()
            .location(DVec3::ZERO)
            .direction(DVec3::ZERO, DVec3::Y)
            .view_plane_size(1.0, 1.0)
            .view_plane_distance(1.0)
            .build()
            .unwrap_err();
        assert_eq!(err.issues(), &[ConfigIssue::ZeroDirection]);
    }

    #[test]
    fn test_builder_rejects_nan_sizes() {
        let err = TargetArea::builder()
            .location(DVec3::ZERO)
            .direction(DVec3::NEG_Z, DVec3::Y)
            .view_plane_size(f64::NAN, f64::NAN)
            .view_plane_distance(f64::NAN)
            .build()
            .unwrap_err();

        let issues = err.issues();
        assert_eq!(issues.len(), 3);
        assert!(matches!(issues[0], ConfigIssue::NonPositiveWidth(w) if w.is_nan()));
        assert!(matches!(issues[1], ConfigIssue::NonPositiveHeight(h) if h.is_nan()));
        assert!(matches!(issues[2], ConfigIssue::NonPositiveDistance(d) if d.is_nan()));
    }
}
