//! Lumen CLI - render a demo scene to an image file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{Camera, ImageWriter, SimpleRayTracer};

mod scenes;
mod settings;

use settings::{RenderSettings, ThreadMode};

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Offline recursive ray tracer", long_about = None)]
struct Cli {
    /// JSON render settings; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Demo scene to render (see --list-scenes)
    #[arg(short, long)]
    scene: Option<String>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Render threads: a count, `auto`, or 0 for a serial render
    #[arg(short, long)]
    threads: Option<ThreadMode>,

    /// Output image; the format follows the extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sub-pixel grid side for anti-aliasing
    #[arg(long)]
    anti_aliasing: Option<usize>,

    /// Intersect against a flat list instead of a BVH
    #[arg(long)]
    no_bvh: bool,

    /// Print the demo scenes and exit
    #[arg(long)]
    list_scenes: bool,
}

impl Cli {
    fn settings(&self) -> Result<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => RenderSettings::load(path)?,
            None => RenderSettings::default(),
        };

        if let Some(scene) = &self.scene {
            settings.scene = scene.clone();
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(threads) = self.threads {
            settings.threads = threads;
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(anti_aliasing) = self.anti_aliasing {
            settings.anti_aliasing = anti_aliasing;
        }
        if self.no_bvh {
            settings.use_bvh = false;
        }
        Ok(settings)
    }
}

fn run(settings: &RenderSettings) -> Result<()> {
    let demo = scenes::demo(&settings.scene, settings.use_bvh)?;
    let view = demo.view;
    let tracer = SimpleRayTracer::with_settings(demo.scene, settings.tracer_settings());
    let sink = Arc::new(ImageWriter::new(
        settings.output.clone(),
        settings.width,
        settings.height,
    ));

    // Keep the view plane's aspect ratio in line with the image
    let aspect = settings.width as f64 / settings.height.max(1) as f64;
    let camera = Camera::builder()
        .location(view.location)
        .direction(view.to, view.up)
        .view_plane_size(view.height * aspect, view.height)
        .view_plane_distance(view.distance)
        .anti_aliasing(settings.anti_aliasing)
        .multithreading(settings.threads.multithreading())
        .progress_interval(settings.progress_interval)
        .ray_tracer(Arc::new(tracer))
        .pixel_sink(sink.clone())
        .build()
        .context("Failed to set up the camera")?;

    let stats = camera.render()?;
    log::info!(
        "Scene '{}': {} pixels, {} threads, {:.2?}",
        settings.scene,
        stats.pixels,
        stats.threads,
        stats.elapsed
    );

    camera
        .write_to_image()
        .with_context(|| format!("Failed to write {}", sink.path().display()))?;
    println!("Saved to {}", sink.path().display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.list_scenes {
        for (name, description) in scenes::DEMOS {
            println!("{:10} {}", name, description);
        }
        return Ok(());
    }

    let settings = cli.settings()?;
    log::debug!("Settings: {:?}", settings);
    run(&settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "lumen",
            "--scene",
            "ambient",
            "--width",
            "64",
            "--threads",
            "0",
            "--no-bvh",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();

        assert_eq!(settings.scene, "ambient");
        assert_eq!(settings.width, 64);
        assert_eq!(settings.height, RenderSettings::default().height);
        assert_eq!(settings.threads, ThreadMode::Serial);
        assert!(!settings.use_bvh);
    }

    #[test]
    fn test_bad_thread_flag() {
        assert!(Cli::try_parse_from(["lumen", "--threads", "lots"]).is_err());
    }

    #[test]
    fn test_render_small_demo() {
        let output = std::env::temp_dir().join(format!("lumen_cli_{}.png", std::process::id()));
        let settings = RenderSettings {
            width: 12,
            height: 8,
            output: output.clone(),
            scene: "ambient".to_string(),
            threads: ThreadMode::Count(2),
            progress_interval: 0.0,
            ..RenderSettings::default()
        };
        run(&settings).unwrap();
        assert!(output.exists());
        std::fs::remove_file(&output).unwrap();
    }
}
