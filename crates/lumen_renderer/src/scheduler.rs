//! Pixel dispatch for render workers.
//!
//! Workers pull pixels one at a time from a shared cursor until it runs
//! out. Claiming a pixel and recording a finished one are two independent
//! critical sections, and neither is held while a ray is traced.

use parking_lot::Mutex;

/// A pixel coordinate handed out by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Default)]
struct Cursor {
    row: usize,
    col: usize,
}

#[derive(Debug, Default)]
struct Progress {
    done: u64,
    /// Last reported progress, in tenths of a percent.
    last_printed: u64,
}

/// Hands out every pixel of a `rows x cols` image exactly once.
#[derive(Debug, Default)]
pub struct PixelScheduler {
    rows: usize,
    cols: usize,
    total: u64,
    /// Progress reporting step in tenths of a percent; 0 disables it.
    step: u64,
    cursor: Mutex<Cursor>,
    progress: Mutex<Progress>,
}

impl PixelScheduler {
    /// An idle scheduler with nothing to hand out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the counters for a new render. Must run before any worker
    /// starts; `&mut self` keeps it from racing with them.
    ///
    /// `interval` is the progress reporting step in percent.
    pub fn initialize(&mut self, rows: usize, cols: usize, interval: f64) {
        self.rows = rows;
        self.cols = cols;
        self.total = (rows * cols) as u64;
        self.step = (interval * 10.0).max(0.0) as u64;
        *self.cursor.get_mut() = Cursor::default();
        *self.progress.get_mut() = Progress::default();

        if self.step > 0 && self.total > 0 {
            log::info!("{:5.1}%", 0.0);
        }
    }

    /// Claim the next pixel in row-major order; `None` once all are taken.
    pub fn next_pixel(&self) -> Option<Pixel> {
        if self.cols == 0 {
            return None;
        }

        let mut cursor = self.cursor.lock();
        if cursor.row >= self.rows {
            return None;
        }

        let pixel = Pixel {
            row: cursor.row,
            col: cursor.col,
        };
        cursor.col += 1;
        if cursor.col == self.cols {
            cursor.col = 0;
            cursor.row += 1;
        }
        Some(pixel)
    }

    /// Record a finished pixel and report progress when it crosses the next
    /// interval.
    pub fn pixel_done(&self) {
        let report = {
            let mut progress = self.progress.lock();
            progress.done += 1;
            if self.step == 0 {
                None
            } else {
                let per_mille = progress.done * 1000 / self.total.max(1);
                if per_mille - progress.last_printed >= self.step {
                    progress.last_printed = per_mille;
                    Some(per_mille)
                } else {
                    None
                }
            }
        };

        if let Some(per_mille) = report {
            log::info!("{:5.1}%", per_mille as f64 / 10.0);
        }
    }

    /// Number of pixels recorded as done.
    pub fn done(&self) -> u64 {
        self.progress.lock().done
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}
