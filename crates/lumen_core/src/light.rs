//! Light sources.
//!
//! Direction queries return `l`, the unit vector pointing from the light
//! towards the lit point.

use lumen_math::{unit, DVec3, MathError};

use crate::Color;

/// Constant light added once to every visible hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient contribution.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::ZERO,
    };

    /// Ambient light of `color` scaled by the attenuation factor `ka`.
    pub fn new(color: Color, ka: f64) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// An omnidirectional light with distance attenuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: DVec3,
    kc: f64,
    kl: f64,
    kq: f64,
    radius: f64,
}

impl PointLight {
    /// Unattenuated point light (`kC = 1`, `kL = kQ = 0`).
    pub fn new(intensity: Color, position: DVec3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            radius: 0.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    /// Give the light a physical size. Shadows from lights with a positive
    /// radius get soft edges.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    fn attenuation(&self, point: DVec3) -> f64 {
        let d = self.position.distance(point);
        self.kc + self.kl * d + self.kq * d * d
    }

    pub fn intensity_at(&self, point: DVec3) -> Color {
        self.intensity / self.attenuation(point)
    }

    /// Unit vector from the light to `point`; `None` at the light itself.
    pub fn direction_to(&self, point: DVec3) -> Option<DVec3> {
        unit(point - self.position).ok()
    }
}

/// A point light that shines mostly along `direction`.
///
/// The `narrow_beam` exponent tightens the cone: intensity falls off as
/// `max(0, direction . l)^narrow_beam`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    light: PointLight,
    direction: DVec3,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: DVec3, direction: DVec3) -> Result<Self, MathError> {
        Ok(Self {
            light: PointLight::new(intensity, position),
            direction: unit(direction)?,
            narrow_beam: 1.0,
        })
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.light = self.light.with_radius(radius);
        self
    }

    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam.max(1.0);
        self
    }

    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    pub fn intensity_at(&self, point: DVec3) -> Color {
        let Some(l) = self.light.direction_to(point) else {
            return self.light.intensity_at(point);
        };
        let factor = self.direction.dot(l).max(0.0).powf(self.narrow_beam);
        self.light.intensity_at(point) * factor
    }
}

/// A light that can cast shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    fn base(&self) -> &PointLight {
        match self {
            Light::Point(light) => light,
            Light::Spot(spot) => &spot.light,
        }
    }

    /// Intensity arriving at `point`.
    pub fn intensity_at(&self, point: DVec3) -> Color {
        match self {
            Light::Point(light) => light.intensity_at(point),
            Light::Spot(spot) => spot.intensity_at(point),
        }
    }

    /// Unit vector from the light to `point`; `None` at the light itself.
    pub fn direction_to(&self, point: DVec3) -> Option<DVec3> {
        self.base().direction_to(point)
    }

    /// Distance from the light to `point`.
    pub fn distance(&self, point: DVec3) -> f64 {
        self.base().position.distance(point)
    }

    pub fn position(&self) -> DVec3 {
        self.base().position
    }

    /// Physical radius; 0 for an ideal point.
    pub fn radius(&self) -> f64 {
        self.base().radius
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}
