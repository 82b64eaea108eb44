//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Shared primitives and utilities for the dashboard pipeline."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_counter_file() -> PathBuf {
    PathBuf::from("output_counter.txt")
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Largest figure area accepted, in pixels.
pub const MAX_FIGURE_PIXELS: u64 = 100_000_000;

fn default_dpi() -> u32 {
    300
}

fn default_width_in() -> f64 {
    14.0
}

fn default_height_in() -> f64 {
    8.0
}

fn default_show() -> bool {
    true
}

/// Primary configuration object for a dashboard run.
///
/// Every field carries a default, so an absent configuration file yields the
/// stock behaviour: counter in `output_counter.txt`, run folders in the
/// working directory, unseeded power samples, 14x8in figure at 300 DPI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_counter_file")]
    pub counter_file: PathBuf,
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub dashboard: RenderConfig,
}

/// Metadata describing where a [`DashboardConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedDashboardConfig {
    pub config: DashboardConfig,
    /// `None` when no file was found and the defaults are in effect.
    pub source: Option<PathBuf>,
}

impl DashboardConfig {
    pub const ENV_CONFIG_PATH: &'static str = "BMS_DASHBOARD_CONFIG";
    pub const DEFAULT_CONFIG_FILE: &'static str = "bms-dashboard.toml";

    /// Load configuration together with the effective source path.
    ///
    /// Unlike a daemon configuration, a missing file is not an error: the
    /// first existing candidate wins and the built-in defaults apply otherwise.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedDashboardConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedDashboardConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                let config = Self::from_path(path)?;
                return Ok(LoadedDashboardConfig {
                    config,
                    source: Some(path.to_path_buf()),
                });
            }
        }

        debug!("no configuration file found; using defaults");
        Ok(LoadedDashboardConfig {
            config: Self::default(),
            source: None,
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<DashboardConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.counter_file.as_os_str().is_empty() {
            return Err(anyhow!("counter_file must not be empty"));
        }
        self.dashboard.validate()
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            counter_file: default_counter_file(),
            output_root: default_output_root(),
            logging: LoggingConfig::default(),
            simulation: SimulationConfig::default(),
            dashboard: RenderConfig::default(),
        }
    }
}

impl std::str::FromStr for DashboardConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: DashboardConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// When set, a daily rolling JSON log is written to this directory as well.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            directory: None,
            file_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the power channel. Unseeded runs draw from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default = "default_width_in")]
    pub width_in: f64,
    #[serde(default = "default_height_in")]
    pub height_in: f64,
    /// Open the saved dashboard in the desktop viewer after the run.
    #[serde(default = "default_show")]
    pub show: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            width_in: default_width_in(),
            height_in: default_height_in(),
            show: default_show(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(anyhow!("dashboard dpi must be greater than zero"));
        }
        let finite = self.width_in.is_finite() && self.height_in.is_finite();
        if !(finite && self.width_in > 0.0 && self.height_in > 0.0) {
            return Err(anyhow!(
                "dashboard dimensions must be finite and positive (got {}x{} in)",
                self.width_in,
                self.height_in
            ));
        }
        let dpi = f64::from(self.dpi);
        let pixels = (self.width_in * dpi).round() * (self.height_in * dpi).round();
        if pixels > MAX_FIGURE_PIXELS as f64 {
            return Err(anyhow!(
                "dashboard of {}x{} in at {} dpi exceeds {} pixels",
                self.width_in,
                self.height_in,
                self.dpi,
                MAX_FIGURE_PIXELS
            ));
        }
        Ok(())
    }
}
