//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "binary"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Binary entrypoint running one dashboard generation."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use bms_common::{init_tracing, DashboardConfig};
use bms_orchestrator::{Pipeline, PipelineSettings};
use bms_persistence::{FileCounterStore, SystemClock};
use bms_report::NoopViewer;
use clap::{ArgAction, Parser};
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Simulate one hour of EV battery telemetry and save a dashboard and spreadsheet",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to configuration file")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "SEED", help = "Seed the power channel for a reproducible run")]
    seed: Option<u64>,

    #[arg(long, help = "Do not open the dashboard after saving it")]
    no_show: bool,

    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print version information and exit"
    )]
    version: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("bms-dashboard {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut candidates = Vec::new();
    if let Some(path) = &cli.config {
        ensure!(path.exists(), "config file {} does not exist", path.display());
        candidates.push(path.clone());
    }
    candidates.push(PathBuf::from(DashboardConfig::DEFAULT_CONFIG_FILE));

    let loaded = DashboardConfig::load_with_source(&candidates)?;
    let mut config = loaded.config;
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if cli.no_show {
        config.dashboard.show = false;
    }
    let _logging = init_tracing("bms-dashboard", &config.logging)?;
    info!(
        config_path = ?loaded.source,
        counter_file = %config.counter_file.display(),
        output_root = %config.output_root.display(),
        seed = ?config.simulation.seed,
        "configuration loaded"
    );

    let counter = FileCounterStore::new(&config.counter_file);
    let settings = PipelineSettings::from_config(&config);
    let outcome = if settings.show {
        Pipeline::new(counter, SystemClock, settings).run()
    } else {
        Pipeline::new(counter, SystemClock, settings)
            .with_viewer(NoopViewer)
            .run()
    };
    let artifacts = outcome.context("dashboard run failed")?;

    info!(run = artifacts.identity.run, dir = %artifacts.directory.display(), "run finished");
    Ok(())
}
