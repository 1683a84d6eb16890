use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use starmap_viewer::data::{read_snapshot_json, write_snapshot_to_file};

/// Pack a journal-scanner JSON snapshot into a compressed bundle.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON snapshot from the journal scanner
    input: PathBuf,
    /// Output bundle; a `.meta.json` summary is written next to it
    #[arg(short, long, default_value = "data/snapshot.bin")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct SnapshotMetadata {
    source: String,
    systems: usize,
    current_system: Option<String>,
    generated_at_epoch: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let snapshot = read_snapshot_json(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let current_known = snapshot.current_system.as_deref().map(|name| {
        snapshot
            .systems
            .iter()
            .any(|system| system.is_named(name))
    });
    if current_known == Some(false) {
        warn!(
            "Current system {:?} is not among the visited systems",
            snapshot.current_system
        );
    }

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    write_snapshot_to_file(&snapshot, &args.output)
        .with_context(|| format!("failed to write bundle to {}", args.output.display()))?;

    let metadata = SnapshotMetadata {
        source: args.input.display().to_string(),
        systems: snapshot.systems.len(),
        current_system: snapshot.current_system.clone(),
        generated_at_epoch: current_epoch_seconds(),
    };
    let metadata_path = args.output.with_extension("meta.json");
    let metadata_json = serde_json::to_vec_pretty(&metadata)?;
    fs::write(&metadata_path, metadata_json)
        .with_context(|| format!("failed to write metadata to {}", metadata_path.display()))?;

    info!(
        "Wrote snapshot bundle to {} ({} systems)",
        args.output.display(),
        metadata.systems
    );
    Ok(())
}

fn current_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
