//! Lumen Core - scene graph for the ray tracer.
//!
//! This crate provides:
//!
//! - **Surfaces**: `Plane`, `Sphere`, `Triangle`, `Polygon`, `Tube`, `Cylinder`,
//!   each wrapped in a `Surface` carrying its `Material` and emission
//! - **Intersection**: the `Intersectable` trait, the flat `Geometries`
//!   aggregate and the frozen `Bvh`
//! - **Lights**: `AmbientLight`, `PointLight`, `SpotLight`
//! - **Scene**: `Scene` and its `SceneBuilder`
//!
//! # Example
//!
//! ```
//! use lumen_core::{Color, Intersectable, Material, Scene, Sphere, Surface};
//! use lumen_math::{DVec3, Ray};
//!
//! let ball = Surface::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0).unwrap())
//!     .with_material(Material::default().with_kd(Color::splat(0.5)));
//! let scene = Scene::builder("example").geometry(ball).build();
//!
//! let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z).unwrap();
//! assert_eq!(scene.geometries().find_intersections(&ray).len(), 2);
//! ```

mod bvh;
mod error;
mod intersectable;
mod light;
mod material;
mod plane;
mod polygon;
mod scene;
mod shape;
mod sphere;
mod surface;
mod tube;

pub use bvh::Bvh;
pub use error::GeometryError;
pub use intersectable::{Geometries, Intersectable};
pub use light::{AmbientLight, Light, PointLight, SpotLight};
pub use material::{Color, Material};
pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use scene::{Scene, SceneBuilder};
pub use shape::{Geometry, Shape};
pub use sphere::Sphere;
pub use surface::{GeoPoint, Surface};
pub use tube::{Cylinder, Tube};
