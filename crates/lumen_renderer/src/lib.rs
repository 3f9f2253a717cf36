//! Lumen Renderer - recursive ray tracing on the CPU.
//!
//! - [`TargetArea`] maps pixel or grid cells to rays
//! - [`SimpleRayTracer`] shades a ray against a [`lumen_core::Scene`]
//! - [`Camera`] ties a view plane to a tracer and a [`PixelSink`]
//! - [`render`] drives the pixel workers through a [`PixelScheduler`]

mod camera;
mod error;
mod render;
mod scheduler;
mod sink;
mod target_area;
mod tracer;

pub use camera::{Camera, CameraBuilder};
pub use error::{CameraError, ConfigIssue, RenderError};
pub use render::{render, Multithreading, RenderStats, SPARE_THREADS};
pub use scheduler::{Pixel, PixelScheduler};
pub use sink::{color_to_rgb, ImageBuffer, ImageWriter, PixelSink};
pub use target_area::{TargetArea, TargetAreaBuilder, DEFAULT_DENSITY, SAMPLING_DISTANCE};
pub use tracer::{RayTracer, SimpleRayTracer, TracerSettings};
