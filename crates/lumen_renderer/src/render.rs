//! Render driver: serial loop or a fixed pool of pixel workers.

use std::time::{Duration, Instant};

use crate::{Camera, PixelScheduler, PixelSink, RayTracer, RenderError};

/// Threads left to the OS when rendering on all cores.
pub const SPARE_THREADS: usize = 2;

/// How many threads render a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Multithreading {
    /// Render row by row on the calling thread
    #[default]
    Serial,
    /// A fixed number of worker threads; 0 means serial
    Threads(usize),
    /// All cores but [`SPARE_THREADS`], at least one
    AllCores,
}

impl Multithreading {
    /// Number of worker threads, or 0 for a serial render.
    pub fn resolve(self) -> usize {
        match self {
            Multithreading::Serial => 0,
            Multithreading::Threads(n) => n,
            Multithreading::AllCores => {
                let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
                cores.saturating_sub(SPARE_THREADS).max(1)
            }
        }
    }
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub pixels: u64,
    /// Worker threads used; 0 for a serial render
    pub threads: usize,
    pub elapsed: Duration,
}

/// Trace every pixel of `sink` through `camera` with `tracer`.
///
/// Workers pull pixels from a fresh [`PixelScheduler`]; no lock is held
/// while a pixel is traced.
pub fn render(
    camera: &Camera,
    tracer: &dyn RayTracer,
    sink: &dyn PixelSink,
    threading: Multithreading,
) -> Result<RenderStats, RenderError> {
    let (cols, rows) = (sink.width(), sink.height());
    let threads = threading.resolve();

    let mut scheduler = PixelScheduler::new();
    scheduler.initialize(rows, cols, camera.progress_interval());

    log::info!(
        "Rendering {}x{} ({} rays/pixel) on {}",
        cols,
        rows,
        camera.anti_aliasing() * camera.anti_aliasing(),
        if threads == 0 {
            "1 thread (serial)".to_string()
        } else {
            format!("{} threads", threads)
        }
    );
    let start = Instant::now();

    if threads == 0 {
        for row in 0..rows {
            for col in 0..cols {
                sink.write_pixel(col, row, camera.pixel_color(tracer, cols, rows, col, row));
                scheduler.pixel_done();
            }
        }
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("lumen-render-{}", i))
            .build()?;

        let scheduler = &scheduler;
        pool.scope(|s| {
            for _ in 0..threads {
                s.spawn(move |_| {
                    while let Some(pixel) = scheduler.next_pixel() {
                        let color = camera.pixel_color(tracer, cols, rows, pixel.col, pixel.row);
                        sink.write_pixel(pixel.col, pixel.row, color);
                        scheduler.pixel_done();
                    }
                });
            }
        });
    }

    let stats = RenderStats {
        pixels: scheduler.done(),
        threads,
        elapsed: start.elapsed(),
    };
    log::info!("Rendered {} pixels in {:.2?}", stats.pixels, stats.elapsed);
    Ok(stats)
}
