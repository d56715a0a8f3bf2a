//! Replay a scripted drag session and print the notifications it fired.
//!
//! ```sh
//! RUST_LOG=draggable=debug drag-replay session.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use draggable::perf::measure;
use draggable::replay::ReplayScript;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "drag-replay", version)]
#[command(about = "Replay a scripted pointer session against a headless scene")]
struct Args {
    /// JSON replay script
    script: PathBuf,

    /// Print the report on one line
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let script = ReplayScript::load(&args.script)
        .with_context(|| format!("failed to load replay script {}", args.script.display()))?;
    let (report, elapsed_ms) = measure(|| script.run());
    let report = report.context("replay failed")?;
    info!(elapsed_ms = format!("{:.2}", elapsed_ms), "Replay complete");

    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");
    Ok(())
}
