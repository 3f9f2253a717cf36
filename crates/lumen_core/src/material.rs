//! Surface material coefficients.

use lumen_math::DVec3;

/// Linear RGB color. Channels are nominally in 0..1 but are not clamped
/// while shading.
pub type Color = DVec3;

/// Phong-style material used by the shading pipeline.
///
/// The `k*` coefficients are per-channel so that, for example, a colored
/// transparent surface tints the shadows it casts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse reflectance
    pub kd: Color,
    /// Specular reflectance
    pub ks: Color,
    /// Transparency (fraction of light passing through)
    pub kt: Color,
    /// Mirror reflection
    pub kr: Color,
    /// Specular highlight exponent
    pub shininess: i32,
    /// Glossiness: side of the sampling area around a reflected ray (0 = mirror)
    pub kg: f64,
    /// Blur: side of the sampling area around a refracted ray (0 = clear)
    pub kb: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self::NONE
    }
}

impl Material {
    /// A black, opaque, non-reflective material.
    pub const NONE: Material = Material {
        kd: Color::ZERO,
        ks: Color::ZERO,
        kt: Color::ZERO,
        kr: Color::ZERO,
        shininess: 0,
        kg: 0.0,
        kb: 0.0,
    };

    pub fn with_kd(mut self, kd: Color) -> Self {
        self.kd = kd;
        self
    }

    pub fn with_ks(mut self, ks: Color) -> Self {
        self.ks = ks;
        self
    }

    pub fn with_kt(mut self, kt: Color) -> Self {
        self.kt = kt;
        self
    }

    pub fn with_kr(mut self, kr: Color) -> Self {
        self.kr = kr;
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Set the glossy spread. Negative values are treated as 0.
    pub fn with_glossiness(mut self, kg: f64) -> Self {
        self.kg = kg.max(0.0);
        self
    }

    /// Set the refraction blur spread. Negative values are treated as 0.
    pub fn with_blur(mut self, kb: f64) -> Self {
        self.kb = kb.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_builder() {
        let m = Material::default()
            .with_kd(Color::splat(0.5))
            .with_ks(Color::new(0.1, 0.2, 0.3))
            .with_shininess(30)
            .with_glossiness(-1.0)
            .with_blur(0.25);

        assert_eq!(m.kd, Color::splat(0.5));
        assert_eq!(m.ks, Color::new(0.1, 0.2, 0.3));
        assert_eq!(m.kt, Color::ZERO);
        assert_eq!(m.shininess, 30);
        assert_eq!(m.kg, 0.0);
        assert_eq!(m.kb, 0.25);
    }
}
