//! Headless layout simulator.
//!
//! Usage:
//!   jostle-sim scenes/row.json
//!   jostle-sim scenes/row.json --margin 10 --settle-ms 50 --pretty

use anyhow::{Context, Result};
use clap::Parser;
use jostle_core::EngineConfig;
use jostle_sim::{ScriptFile, run_script};
use std::path::PathBuf;
use std::time::Duration;

/// Replay drag and collapse scripts against an in-memory scene.
#[derive(Parser, Debug)]
#[command(name = "jostle-sim")]
#[command(about = "Replay box drag/collapse scripts and print the resulting layout")]
struct Args {
    /// Scene file (JSON)
    scene: PathBuf,

    /// Override the gap kept between repelled boxes
    #[arg(long)]
    margin: Option<f64>,

    /// Override the drag settle delay in milliseconds
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let json = std::fs::read_to_string(&args.scene)
        .with_context(|| format!("reading {}", args.scene.display()))?;
    let file = ScriptFile::from_json(&json)
        .with_context(|| format!("parsing {}", args.scene.display()))?;

    let config = EngineConfig::new(
        args.margin.unwrap_or(file.config.margin),
        args.settle_ms
            .map(Duration::from_millis)
            .unwrap_or(file.config.settle_delay),
    )?;
    log::info!(
        "replaying {} steps over {} boxes",
        file.script.len(),
        file.boxes.len()
    );

    let report = run_script(&file, config)?;
    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}
