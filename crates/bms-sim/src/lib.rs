//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "01-bootstrap"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Simulation module exports and shared types."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
//! Synthetic battery telemetry for the BMS dashboard.
//!
//! [`channels`] holds the per-channel descriptor table (signal profile, zone
//! bands, labels, colours); [`generator`] turns it into sample arrays over a
//! [`TimeDomain`].

use thiserror::Error;

pub mod channels;
pub mod generator;
pub mod summary;

pub use channels::{
    AxisStyle, Channel, ChannelDescriptor, Rgb, Severity, SignalProfile, ZoneBand, DESCRIPTORS,
};
pub use generator::{linspace, SignalGenerator, Telemetry, TimeDomain, SAMPLE_COUNT};
pub use summary::ChannelSummary;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid normal distribution for {channel} (mean {mean}, std-dev {std_dev}): {source}")]
    Distribution {
        channel: Channel,
        mean: f64,
        std_dev: f64,
        #[source]
        source: rand_distr::NormalError,
    },
}
