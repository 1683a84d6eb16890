use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use starmap_viewer::data::read_snapshot;
use starmap_viewer::render::svg_surface::SvgSurface;
use starmap_viewer::{MapConfig, StarMap};

/// Render one frame of a visited-systems snapshot to an SVG file.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Snapshot to draw: `.json` from the journal scanner or a packed bundle
    snapshot: PathBuf,
    /// Where to write the SVG
    #[arg(short, long, default_value = "starmap.svg")]
    output: PathBuf,
    /// JSON map config; defaults apply to anything it leaves out
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
    #[arg(long, default_value_t = 800.0)]
    height: f64,
    /// Camera yaw in radians
    #[arg(long, allow_negative_numbers = true)]
    yaw: Option<f64>,
    /// Camera pitch in radians, clamped to ±π/2
    #[arg(long, allow_negative_numbers = true)]
    pitch: Option<f64>,
    #[arg(long)]
    zoom: Option<f64>,
    /// System to centre on; defaults to the current system
    #[arg(long)]
    center: Option<String>,
    /// System to mark as a search result
    #[arg(long)]
    highlight: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MapConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => MapConfig::default(),
    };
    if let Some(yaw) = args.yaw {
        config.camera.initial_yaw = yaw;
    }
    if let Some(pitch) = args.pitch {
        config.camera.initial_pitch = pitch;
    }
    if let Some(zoom) = args.zoom {
        config.camera.initial_zoom = zoom;
    }

    let snapshot = read_snapshot(&args.snapshot)
        .with_context(|| format!("failed to read snapshot {}", args.snapshot.display()))?;
    info!(
        "Loaded {} systems from {}",
        snapshot.systems.len(),
        args.snapshot.display()
    );

    let mut map = StarMap::new(config).context("invalid map config")?;
    map.resize(args.width, args.height);
    map.apply_snapshot(snapshot);

    let target = args
        .center
        .clone()
        .or_else(|| map.current_system().map(str::to_string));
    if let Some(name) = &target {
        if !map.center_on_system(name) {
            warn!("No system named {name:?}; centring on the origin");
        }
    }
    map.highlight_system(args.highlight.as_deref());

    let mut surface = SvgSurface::new(args.width, args.height);
    let stats = map
        .render(&mut surface)
        .context("viewport has no area; pass a positive --width and --height")?;
    surface
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        "Wrote {} ({} systems, {} labels)",
        args.output.display(),
        stats.systems,
        stats.labels
    );
    Ok(())
}
