//! Built-in demo scenes.

use anyhow::{bail, Result};
use lumen_core::{
    AmbientLight, Color, Cylinder, GeometryError, Material, Plane, PointLight, Polygon, Scene,
    SceneBuilder, Sphere, SpotLight, Surface, Triangle,
};
use lumen_math::{DVec3, Ray};

/// Name and one-line description of every demo scene.
pub const DEMOS: &[(&str, &str)] = &[
    (
        "spheres",
        "transparent, mirror and emissive spheres over a glossy floor",
    ),
    ("polygons", "a pyramid, a back wall and cylinders"),
    ("ambient", "a single emissive sphere under ambient light"),
];

/// Where the camera looks from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub location: DVec3,
    pub to: DVec3,
    pub up: DVec3,
    /// View plane height; the width follows the image aspect ratio
    pub height: f64,
    pub distance: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            location: DVec3::new(0.0, 0.0, 1000.0),
            to: DVec3::NEG_Z,
            up: DVec3::Y,
            height: 200.0,
            distance: 1000.0,
        }
    }
}

/// A demo scene and its suggested camera.
pub struct Demo {
    pub scene: Scene,
    pub view: View,
}

/// Build the demo scene called `name`.
pub fn demo(name: &str, use_bvh: bool) -> Result<Demo> {
    let builder = Scene::builder(name).use_bvh(use_bvh);
    let (scene, view) = match name {
        "spheres" => (spheres(builder)?, View::default()),
        "polygons" => (
            polygons(builder)?,
            View {
                height: 300.0,
                ..View::default()
            },
        ),
        "ambient" => (ambient(builder)?, View::default()),
        _ => bail!(
            "Unknown scene '{}' (available: {})",
            name,
            DEMOS.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", ")
        ),
    };
    Ok(Demo { scene, view })
}

fn floor(y: f64) -> Result<Surface, GeometryError> {
    Ok(Surface::new(Plane::new(DVec3::new(0.0, y, 0.0), DVec3::Y)?).with_material(
        Material::default()
            .with_kd(Color::splat(0.3))
            .with_ks(Color::splat(0.2))
            .with_shininess(30)
            .with_kr(Color::splat(0.25))
            .with_glossiness(4.0),
    ))
}

fn spheres(builder: SceneBuilder) -> Result<Scene, GeometryError> {
    let shell = Surface::new(Sphere::new(DVec3::new(-30.0, -10.0, 0.0), 40.0)?)
        .with_emission(Color::new(0.0, 0.0, 0.15))
        .with_material(
            Material::default()
                .with_kd(Color::splat(0.2))
                .with_ks(Color::splat(0.4))
                .with_shininess(100)
                .with_kt(Color::splat(0.6)),
        );
    let core = Surface::new(Sphere::new(DVec3::new(-30.0, -10.0, 0.0), 20.0)?)
        .with_emission(Color::new(0.4, 0.1, 0.1))
        .with_material(
            Material::default()
                .with_kd(Color::splat(0.5))
                .with_ks(Color::splat(0.5))
                .with_shininess(100),
        );
    let mirror = Surface::new(Sphere::new(DVec3::new(50.0, -10.0, -50.0), 40.0)?)
        .with_material(
            Material::default()
                .with_kd(Color::splat(0.1))
                .with_kr(Color::splat(0.8)),
        );
    let lamp = Surface::new(Sphere::new(DVec3::new(25.0, -35.0, 60.0), 15.0)?)
        .with_emission(Color::new(0.2, 0.5, 0.2))
        .with_material(Material::default().with_kd(Color::splat(0.4)));

    let spot = SpotLight::new(
        Color::new(1.0, 0.8, 0.6),
        DVec3::new(-100.0, 100.0, 200.0),
        DVec3::new(1.0, -1.0, -2.0),
    )?
    .with_kl(0.0004)
    .with_kq(0.000_000_6)
    .with_narrow_beam(2.0);

    Ok(builder
        .background(Color::new(0.05, 0.05, 0.1))
        .ambient(AmbientLight::new(Color::ONE, 0.1))
        .geometry(floor(-50.0)?)
        .geometry(shell)
        .geometry(core)
        .geometry(mirror)
        .geometry(lamp)
        .light(spot)
        .light(
            PointLight::new(Color::splat(0.5), DVec3::new(100.0, 100.0, 100.0))
                .with_kl(0.0001)
                .with_radius(5.0),
        )
        .build())
}

fn polygons(builder: SceneBuilder) -> Result<Scene, GeometryError> {
    let stone = Material::default()
        .with_kd(Color::new(0.6, 0.5, 0.3))
        .with_ks(Color::splat(0.3))
        .with_shininess(40);

    let apex = DVec3::new(0.0, 40.0, 0.0);
    let base = [
        DVec3::new(-45.0, -50.0, -45.0),
        DVec3::new(45.0, -50.0, -45.0),
        DVec3::new(45.0, -50.0, 45.0),
        DVec3::new(-45.0, -50.0, 45.0),
    ];

    let mut builder = builder
        .background(Color::new(0.02, 0.02, 0.05))
        .ambient(AmbientLight::new(Color::ONE, 0.08))
        .geometry(floor(-50.0)?);

    for i in 0..base.len() {
        let face = Triangle::new(base[i], base[(i + 1) % base.len()], apex)?;
        builder = builder.geometry(Surface::new(face).with_material(stone));
    }

    let wall = Polygon::new(vec![
        DVec3::new(-150.0, -50.0, -150.0),
        DVec3::new(150.0, -50.0, -150.0),
        DVec3::new(150.0, 150.0, -150.0),
        DVec3::new(-150.0, 150.0, -150.0),
    ])?;
    let column = Cylinder::new(Ray::new(DVec3::new(90.0, -50.0, 20.0), DVec3::Y)?, 15.0, 80.0)?;
    let glass = Cylinder::new(
        Ray::new(DVec3::new(-90.0, -35.0, 40.0), DVec3::new(1.0, 0.0, -1.0))?,
        15.0,
        50.0,
    )?;

    Ok(builder
        .geometry(
            Surface::new(wall).with_material(
                Material::default()
                    .with_kd(Color::splat(0.2))
                    .with_kr(Color::splat(0.5))
                    .with_glossiness(2.0),
            ),
        )
        .geometry(
            Surface::new(column).with_material(
                Material::default()
                    .with_kd(Color::new(0.2, 0.4, 0.6))
                    .with_ks(Color::splat(0.4))
                    .with_shininess(50),
            ),
        )
        .geometry(
            Surface::new(glass)
                .with_emission(Color::new(0.1, 0.0, 0.1))
                .with_material(
                    Material::default()
                        .with_kd(Color::splat(0.2))
                        .with_kt(Color::splat(0.5))
                        .with_blur(3.0),
                ),
        )
        .light(
            SpotLight::new(
                Color::new(0.9, 0.9, 0.7),
                DVec3::new(-120.0, 140.0, 160.0),
                DVec3::new(1.0, -1.0, -1.0),
            )?
            .with_kl(0.0002)
            .with_narrow_beam(3.0),
        )
        .light(PointLight::new(Color::splat(0.4), DVec3::new(120.0, 80.0, 120.0)).with_kl(0.0002))
        .build())
}

fn ambient(builder: SceneBuilder) -> Result<Scene, GeometryError> {
    Ok(builder
        .background(Color::ZERO)
        .ambient(AmbientLight::new(Color::ONE, 0.15))
        .geometry(
            Surface::new(Sphere::new(DVec3::new(0.0, 0.0, -100.0), 60.0)?)
                .with_emission(Color::new(0.3, 0.5, 0.7))
                .with_material(Material::default().with_kd(Color::splat(0.5))),
        )
        .build())
}
