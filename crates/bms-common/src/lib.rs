//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Shared primitives and utilities for the dashboard pipeline."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
//! Core shared primitives for the BMS dashboard workspace.
//! This crate exposes configuration loading and the tracing setup
//! consumed by the pipeline crates and the binary.

pub mod config;
pub mod logging;

pub use config::{
    DashboardConfig, LoadedDashboardConfig, LoggingConfig, RenderConfig, SimulationConfig,
    MAX_FIGURE_PIXELS,
};
pub use logging::{init_tracing, log_stage_event, LogFormat, LoggingGuard, StageOutcome};
