//! Render settings, loaded from JSON and overridden from the command line.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use lumen_renderer::{Multithreading, TracerSettings};
use serde::{Deserialize, Serialize};

/// How many render threads to use.
///
/// In JSON this is `"auto"`, `"serial"` or `{"count": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadMode {
    Auto,
    Serial,
    Count(usize),
}

impl ThreadMode {
    pub fn multithreading(self) -> Multithreading {
        match self {
            ThreadMode::Auto => Multithreading::AllCores,
            ThreadMode::Serial | ThreadMode::Count(0) => Multithreading::Serial,
            ThreadMode::Count(n) => Multithreading::Threads(n),
        }
    }
}

impl FromStr for ThreadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ThreadMode::Auto),
            "serial" | "0" => Ok(ThreadMode::Serial),
            _ => s
                .parse()
                .map(ThreadMode::Count)
                .map_err(|_| format!("expected a thread count, `auto` or `serial`, got `{}`", s)),
        }
    }
}

impl fmt::Display for ThreadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadMode::Auto => write!(f, "auto"),
            ThreadMode::Serial => write!(f, "serial"),
            ThreadMode::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Everything needed to render one of the demo scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub output: PathBuf,
    /// Name of a built-in demo scene
    pub scene: String,
    pub threads: ThreadMode,
    /// Progress reporting step in percent (0 = quiet)
    pub progress_interval: f64,
    /// Sub-pixel grid side (1 = one ray per pixel)
    pub anti_aliasing: usize,
    pub max_level: u32,
    pub glossy_density: usize,
    pub shadow_density: usize,
    pub use_bvh: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let tracer = TracerSettings::default();
        Self {
            width: 500,
            height: 500,
            output: PathBuf::from("lumen.png"),
            scene: "spheres".to_string(),
            threads: ThreadMode::Auto,
            progress_interval: 10.0,
            anti_aliasing: 1,
            max_level: tracer.max_level,
            glossy_density: tracer.glossy_density,
            shadow_density: tracer.shadow_density,
            use_bvh: true,
        }
    }
}

impl RenderSettings {
    /// Read settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn tracer_settings(&self) -> TracerSettings {
        TracerSettings {
            max_level: self.max_level,
            glossy_density: self.glossy_density,
            shadow_density: self.shadow_density,
            ..TracerSettings::default()
        }
    }
}
