//! Headless interaction session runner
//!
//! Drives a scripted hand session through an interactable and its
//! manipulation, logging lifecycle events and the resulting transform.

mod error;
mod runner;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ix_manipulation::ManipulationConfig;

use crate::error::SimError;
use crate::runner::Simulation;
use crate::script::Script;

#[derive(Debug, Parser)]
#[command(name = "ix-sim", version, about = "Run a scripted interaction session")]
struct Args {
    /// Manipulation configuration (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session script (RON); the built-in two-hand demo runs when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Write the built-in demo script to this path and exit
    #[arg(long)]
    export_demo: Option<PathBuf>,
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ix_sim=info,ix_core=debug,ix_manipulation=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ix-sim");

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SimError> {
    if let Some(path) = &args.export_demo {
        Script::two_hand_demo().save(path)?;
        tracing::info!("Demo script written to {}", path.display());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            ManipulationConfig::load(path)?
        }
        None => ManipulationConfig::default(),
    };
    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::two_hand_demo(),
    };

    let mut simulation = Simulation::new(config)?;
    let report = simulation.run(&script)?;

    let t = report.final_transform;
    tracing::info!(
        "Finished {} frames: {} sessions, {} updates, {} scale limits, {} bubbled",
        report.frames,
        report.stats.sessions,
        report.stats.updates,
        report.stats.scale_limits,
        report.stats.bubbled
    );
    tracing::debug!(
        "{} interactables registered, manipulation {:?}",
        simulation.registered(),
        simulation.manipulation().lock().state()
    );
    tracing::info!(
        "Final transform: position {}, rotation {}, scale {}",
        t.position,
        t.rotation,
        t.scale
    );
    Ok(())
}
