//! Camera: view plane, sampling and the render entry point.

use std::sync::Arc;

use lumen_core::Color;
use lumen_math::{DVec3, Ray};

use crate::render::{self, Multithreading, RenderStats};
use crate::target_area::TargetAreaBuilder;
use crate::{CameraError, ConfigIssue, PixelSink, RayTracer, RenderError, TargetArea};

/// A configured camera bound to a ray tracer and a pixel sink.
///
/// Built with [`Camera::builder`]; every field is validated at
/// [`CameraBuilder::build`].
pub struct Camera {
    target: TargetArea,
    anti_aliasing: usize,
    threads: Multithreading,
    progress_interval: f64,
    tracer: Arc<dyn RayTracer>,
    sink: Arc<dyn PixelSink>,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    pub fn target(&self) -> &TargetArea {
        &self.target
    }

    pub fn anti_aliasing(&self) -> usize {
        self.anti_aliasing
    }

    pub fn threads(&self) -> Multithreading {
        self.threads
    }

    /// Progress reporting step in percent; 0 disables reporting.
    pub fn progress_interval(&self) -> f64 {
        self.progress_interval
    }

    pub fn tracer(&self) -> &dyn RayTracer {
        self.tracer.as_ref()
    }

    pub fn sink(&self) -> &dyn PixelSink {
        self.sink.as_ref()
    }

    /// Ray through the center of pixel `(j, i)` of an `nx` by `ny` image.
    pub fn construct_ray(&self, nx: usize, ny: usize, j: usize, i: usize) -> Ray {
        self.target.construct_ray(nx, ny, j, i)
    }

    /// Color of pixel `(col, row)`, averaging `anti_aliasing^2` sub-pixel
    /// rays.
    pub fn pixel_color(
        &self,
        tracer: &dyn RayTracer,
        nx: usize,
        ny: usize,
        col: usize,
        row: usize,
    ) -> Color {
        let d = self.anti_aliasing;
        if d == 1 {
            return tracer.trace_ray(&self.construct_ray(nx, ny, col, row));
        }

        let mut color = Color::ZERO;
        for si in 0..d {
            for sj in 0..d {
                let ray = self.construct_ray(nx * d, ny * d, col * d + sj, row * d + si);
                color += tracer.trace_ray(&ray);
            }
        }
        color / (d * d) as f64
    }

    /// Trace every pixel of the sink.
    pub fn render(&self) -> Result<RenderStats, RenderError> {
        render::render(self, self.tracer(), self.sink(), self.threads)
    }

    /// Overwrite every pixel whose row or column is a multiple of
    /// `interval` with `color`.
    pub fn print_grid(&self, interval: usize, color: Color) {
        if interval == 0 {
            log::warn!("Grid interval must be positive, skipping grid");
            return;
        }
        let sink = self.sink();
        for row in 0..sink.height() {
            for col in 0..sink.width() {
                if row % interval == 0 || col % interval == 0 {
                    sink.write_pixel(col, row, color);
                }
            }
        }
    }

    /// Flush the sink.
    pub fn write_to_image(&self) -> Result<(), RenderError> {
        self.sink.flush()
    }
}

/// Builder for [`Camera`].
pub struct CameraBuilder {
    area: TargetAreaBuilder,
    anti_aliasing: usize,
    threads: Multithreading,
    progress_interval: f64,
    tracer: Option<Arc<dyn RayTracer>>,
    sink: Option<Arc<dyn PixelSink>>,
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            area: TargetAreaBuilder::default(),
            anti_aliasing: 1,
            threads: Multithreading::default(),
            progress_interval: 0.0,
            tracer: None,
            sink: None,
        }
    }
}

impl CameraBuilder {
    pub fn location(mut self, location: DVec3) -> Self {
        self.area = self.area.location(location);
        self
    }

    /// Viewing direction and up vector; they must be orthogonal.
    pub fn direction(mut self, to: DVec3, up: DVec3) -> Self {
        self.area = self.area.direction(to, up);
        self
    }

    pub fn view_plane_size(mut self, width: f64, height: f64) -> Self {
        self.area = self.area.view_plane_size(width, height);
        self
    }

    pub fn view_plane_distance(mut self, distance: f64) -> Self {
        self.area = self.area.view_plane_distance(distance);
        self
    }

    /// Sub-pixel grid side; 1 traces one ray per pixel.
    pub fn anti_aliasing(mut self, density: usize) -> Self {
        self.anti_aliasing = density;
        self
    }

    pub fn multithreading(mut self, threads: Multithreading) -> Self {
        self.threads = threads;
        self
    }

    /// Progress reporting step in percent, between 0 and 100.
    pub fn progress_interval(mut self, interval: f64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn ray_tracer(mut self, tracer: Arc<dyn RayTracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn pixel_sink(mut self, sink: Arc<dyn PixelSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Result<Camera, CameraError> {
        let (target, mut issues) = match self.area.validate() {
            Ok(target) => (Some(target), Vec::new()),
            Err(issues) => (None, issues),
        };

        if self.anti_aliasing == 0 {
            issues.push(ConfigIssue::ZeroAntiAliasing);
        }
        if !(0.0..=100.0).contains(&self.progress_interval) {
            issues.push(ConfigIssue::ProgressInterval(self.progress_interval));
        }
        if self.tracer.is_none() {
            issues.push(ConfigIssue::MissingRayTracer);
        }
        if self.sink.is_none() {
            issues.push(ConfigIssue::MissingPixelSink);
        }

        match (target, self.tracer, self.sink) {
            (Some(target), Some(tracer), Some(sink)) if issues.is_empty() => Ok(Camera {
                target,
                anti_aliasing: self.anti_aliasing,
                threads: self.threads,
                progress_interval: self.progress_interval,
                tracer,
                sink,
            }),
            _ => Err(CameraError::Invalid(issues)),
        }
    }
}
