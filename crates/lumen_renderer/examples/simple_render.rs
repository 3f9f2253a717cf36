//! Simple ray tracer example.
//!
//! Renders a few spheres over a mirror-ish floor and saves a PNG.

use std::sync::Arc;

use lumen_core::{AmbientLight, Color, Material, Plane, PointLight, Scene, Sphere, SpotLight, Surface};
use lumen_math::DVec3;
use lumen_renderer::{Camera, ImageWriter, Multithreading, SimpleRayTracer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let sink = Arc::new(ImageWriter::new("output.png", 800, 450));
    let camera = Camera::builder()
        .location(DVec3::new(0.0, 1.0, 10.0))
        .direction(DVec3::NEG_Z, DVec3::Y)
        .view_plane_size(16.0, 9.0)
        .view_plane_distance(10.0)
        .anti_aliasing(2)
        .multithreading(Multithreading::AllCores)
        .progress_interval(10.0)
        .ray_tracer(Arc::new(SimpleRayTracer::new(scene)))
        .pixel_sink(sink.clone())
        .build()?;

    let stats = camera.render()?;
    println!(
        "Rendered {} pixels on {} threads in {:?}",
        stats.pixels, stats.threads, stats.elapsed
    );

    camera.write_to_image()?;
    println!("Saved to {}", sink.path().display());
    Ok(())
}

fn build_scene() -> Result<Scene, Box<dyn std::error::Error>> {
    let floor = Surface::new(Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y)?).with_material(
        Material::default()
            .with_kd(Color::splat(0.4))
            .with_kr(Color::splat(0.3))
            .with_glossiness(3.0),
    );

    let glass = Surface::new(Sphere::new(DVec3::new(0.0, 0.0, 0.0), 1.0)?)
        .with_emission(Color::new(0.05, 0.05, 0.1))
        .with_material(
            Material::default()
                .with_kd(Color::splat(0.2))
                .with_ks(Color::splat(0.5))
                .with_shininess(100)
                .with_kt(Color::splat(0.6)),
        );

    let matte = Surface::new(Sphere::new(DVec3::new(-3.0, 0.0, -1.0), 1.0)?)
        .with_material(
            Material::default()
                .with_kd(Color::new(0.7, 0.3, 0.2))
                .with_ks(Color::splat(0.2))
                .with_shininess(20),
        );

    let mirror = Surface::new(Sphere::new(DVec3::new(3.0, 0.0, -1.0), 1.0)?)
        .with_material(
            Material::default()
                .with_kd(Color::splat(0.1))
                .with_kr(Color::splat(0.8)),
        );

    let scene = Scene::builder("simple")
        .background(Color::new(0.05, 0.07, 0.1))
        .ambient(AmbientLight::new(Color::ONE, 0.1))
        .geometry(floor)
        .geometry(glass)
        .geometry(matte)
        .geometry(mirror)
        .light(
            SpotLight::new(Color::splat(0.8), DVec3::new(-4.0, 6.0, 4.0), DVec3::new(1.0, -1.5, -1.0))?
                .with_kl(0.01)
                .with_narrow_beam(4.0),
        )
        .light(PointLight::new(Color::splat(0.5), DVec3::new(5.0, 5.0, 5.0)).with_radius(0.5))
        .build();
    Ok(scene)
}
