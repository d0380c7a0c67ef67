use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use orb_core::{Background, SceneFile};
use orb_renderer::{render, render_parallel, Camera, DisplaySink, ImageFileSink, Scene};

/// Render a sphere scene over a background image.
#[derive(Parser, Debug)]
#[command(name = "orb_viewer", version)]
struct Args {
    /// Background image shown wherever no sphere is hit
    background: PathBuf,

    /// Scene file (JSON); defaults to the built-in golf scene
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Output image; format follows the extension
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Render on a single thread
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    log::info!("Starting orb viewer");

    let background = Background::load(&args.background)
        .with_context(|| format!("Can't read the background {}", args.background.display()))?;
    log::info!(
        "Background {} ({}x{})",
        background.path,
        background.width,
        background.height
    );

    let file = match &args.scene {
        Some(path) => SceneFile::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => SceneFile::golf(),
    };
    let config = file.render;
    config.validate().context("Invalid render settings")?;

    let scene = Scene::from_desc(&file.scene).context("Invalid scene")?;
    log::info!(
        "Scene: {} spheres, {} lights",
        scene.len(),
        scene.light_count()
    );

    let camera = Camera::from_config(&config);
    let start = Instant::now();
    let image = if args.sequential {
        render(&camera, &scene, &background, &config)
    } else {
        render_parallel(&camera, &scene, &background, &config)
    };
    log::info!(
        "Rendered {}x{} in {:?}",
        image.width,
        image.height,
        start.elapsed()
    );

    let mut sink = ImageFileSink::new(&args.output);
    sink.present(&image)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
