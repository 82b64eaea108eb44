//! ---
//! ems_section: "04-configuration-orchestration"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Run pipeline sequencing counter, output folder, simulation, and artifacts."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! One dashboard run, start to finish.
//!
//! Stages execute strictly in order: reserve a run number, create the run
//! folder, generate telemetry, render the dashboard, export the spreadsheet,
//! optionally display the image and finally print the report. The first
//! failing stage aborts the run; display and report failures are logged and
//! tolerated because both artifacts already exist by then.

use std::io::{Stdout, Write};
use std::path::PathBuf;

use bms_common::{log_stage_event, DashboardConfig, StageOutcome};
use bms_persistence::{Clock, CounterStore, OutputLocationBuilder, PersistenceError, RunIdentity};
use bms_report::{
    DashboardRenderer, DataExporter, ExportError, RenderError, RunReporter, SystemViewer, Viewer,
};
use bms_sim::{ChannelSummary, SignalGenerator, SimError, TimeDomain};
use thiserror::Error;
use tracing::{info, warn};

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Any failure that aborts a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Counter or run folder failure.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// Telemetry generation failure.
    #[error(transparent)]
    Simulation(#[from] SimError),
    /// Dashboard image failure; the spreadsheet is not attempted.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Spreadsheet failure.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Knobs for a run, normally taken from [`DashboardConfig`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Directory the run folders are created in.
    pub output_root: PathBuf,
    /// Seed for the power channel; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Figure resolution.
    pub dpi: u32,
    /// Figure width in inches.
    pub width_in: f64,
    /// Figure height in inches.
    pub height_in: f64,
    /// Hand the dashboard to the viewer after both artifacts are written.
    pub show: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl PipelineSettings {
    /// Settings matching a loaded configuration.
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            output_root: config.output_root.clone(),
            seed: config.simulation.seed,
            dpi: config.dashboard.dpi,
            width_in: config.dashboard.width_in,
            height_in: config.dashboard.height_in,
            show: config.dashboard.show,
        }
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    /// Run number and timestamp.
    pub identity: RunIdentity,
    /// Run folder.
    pub directory: PathBuf,
    /// Path of `bms_dashboard.png`.
    pub dashboard: PathBuf,
    /// Path of `bms_data.xlsx`.
    pub data: PathBuf,
    /// Per-channel statistics of the generated telemetry.
    pub summary: Vec<ChannelSummary>,
}

/// Linear run pipeline with injected counter, clock, viewer and report sink.
pub struct Pipeline<S, C, V = SystemViewer, W = Stdout> {
    counter: S,
    clock: C,
    viewer: V,
    reporter: RunReporter<W>,
    settings: PipelineSettings,
}

impl<S: CounterStore, C: Clock> Pipeline<S, C> {
    /// Pipeline using the desktop viewer and reporting on stdout.
    pub fn new(counter: S, clock: C, settings: PipelineSettings) -> Self {
        Self {
            counter,
            clock,
            viewer: SystemViewer,
            reporter: RunReporter::stdout(),
            settings,
        }
    }
}

impl<S, C, V, W> Pipeline<S, C, V, W> {
    /// Replace the viewer used for the display stage.
    pub fn with_viewer<V2: Viewer>(self, viewer: V2) -> Pipeline<S, C, V2, W> {
        Pipeline {
            counter: self.counter,
            clock: self.clock,
            viewer,
            reporter: self.reporter,
            settings: self.settings,
        }
    }

    /// Replace the sink the completion report is written to.
    pub fn with_report_sink<W2: Write>(self, sink: W2) -> Pipeline<S, C, V, W2> {
        Pipeline {
            counter: self.counter,
            clock: self.clock,
            viewer: self.viewer,
            reporter: RunReporter::new(sink),
            settings: self.settings,
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Counter store, e.g. to inspect a fake after a run.
    pub fn counter(&self) -> &S {
        &self.counter
    }

    /// Report sink.
    pub fn report_sink(&self) -> &W {
        self.reporter.get_ref()
    }
}

impl<S, C, V, W> Pipeline<S, C, V, W>
where
    S: CounterStore,
    C: Clock,
    V: Viewer,
    W: Write,
{
    /// Execute one run.
    pub fn run(&mut self) -> Result<RunArtifacts> {
        let run = self
            .counter
            .next()
            .map_err(|err| fault(None, "counter", err))?;
        log_stage_event(Some(run), "counter", "run number reserved", StageOutcome::Success);
        let identity = RunIdentity::new(run, self.clock.now());
        info!(run, folder = %identity, "run started");

        let location = stage(
            Some(run),
            "output_dir",
            OutputLocationBuilder::new(&self.settings.output_root).create(identity),
        )?;

        let mut generator = match self.settings.seed {
            Some(seed) => SignalGenerator::seeded(seed),
            None => SignalGenerator::from_entropy(),
        };
        let telemetry = stage(
            Some(run),
            "simulate",
            generator.generate(&TimeDomain::one_hour()),
        )?;
        let summary = telemetry.summary();
        for channel in &summary {
            info!(
                run,
                channel = %channel.channel,
                min = channel.min,
                max = channel.max,
                mean = channel.mean,
                last = channel.last,
                zone = channel.final_zone.unwrap_or("-"),
                "channel summary"
            );
        }

        let renderer =
            DashboardRenderer::new(self.settings.dpi, self.settings.width_in, self.settings.height_in);
        let dashboard = stage(
            Some(run),
            "render",
            renderer.render(&telemetry, &location.dir),
        )?;
        let data = stage(
            Some(run),
            "export",
            DataExporter::new().export(&telemetry, &location.dir),
        )?;

        if self.settings.show {
            if let Err(err) = self.viewer.show(&dashboard) {
                warn!(run, error = %err, "dashboard display skipped");
            }
        }

        if let Err(err) = self.reporter.report(&dashboard, &data) {
            warn!(run, error = %err, "run report could not be written");
        }
        log_stage_event(Some(run), "report", "run complete", StageOutcome::Success);

        Ok(RunArtifacts {
            identity: location.identity,
            directory: location.dir,
            dashboard,
            data,
            summary,
        })
    }
}

fn stage<T, E>(run: Option<u64>, name: &str, result: std::result::Result<T, E>) -> Result<T>
where
    E: Into<PipelineError>,
{
    match result {
        Ok(value) => {
            log_stage_event(run, name, "completed", StageOutcome::Success);
            Ok(value)
        }
        Err(err) => Err(fault(run, name, err)),
    }
}

fn fault(run: Option<u64>, name: &str, err: impl Into<PipelineError>) -> PipelineError {
    let err = err.into();
    log_stage_event(run, name, &err.to_string(), StageOutcome::Fault);
    err
}
