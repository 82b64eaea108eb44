//! ---
//! ems_section: "03-persistence-logging"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Run counter persistence and output folder bindings."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::{PersistenceError, Result};

/// Prefix shared by every run folder.
pub const RUN_DIR_PREFIX: &str = "Output-";

/// Date and 12-hour clock time with AM/PM marker, minute resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d__%I-%M%p";

/// Wall-clock source used to stamp run folders.
pub trait Clock {
    /// Current local time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Run number plus the formatted timestamp it was started at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    /// Value reserved from the run counter.
    pub run: u64,
    /// Start time rendered with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

impl RunIdentity {
    /// Stamp `run` with `started_at`.
    pub fn new(run: u64, started_at: NaiveDateTime) -> Self {
        Self {
            run,
            timestamp: started_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Folder name, e.g. `Output-007__2024-03-09__02-05PM`.
    pub fn folder_name(&self) -> String {
        format!("{}{:03}__{}", RUN_DIR_PREFIX, self.run, self.timestamp)
    }
}

impl fmt::Display for RunIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.folder_name())
    }
}

/// A created run folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    /// Identity the folder was named after.
    pub identity: RunIdentity,
    /// Path of the folder, relative to the working directory when the root is.
    pub dir: PathBuf,
}

impl OutputLocation {
    /// Path of an artifact inside the run folder.
    pub fn artifact(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// Creates run folders beneath a fixed root directory.
#[derive(Debug, Clone)]
pub struct OutputLocationBuilder {
    root: PathBuf,
}

impl OutputLocationBuilder {
    /// Folders are created under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the folder for `identity` lives. A `.` or empty root yields a
    /// bare relative folder name.
    pub fn folder_path(&self, identity: &RunIdentity) -> PathBuf {
        if self.root.as_os_str().is_empty() || self.root == Path::new(".") {
            PathBuf::from(identity.folder_name())
        } else {
            self.root.join(identity.folder_name())
        }
    }

    /// Create the folder for `identity`. An existing folder is reused.
    pub fn create(&self, identity: RunIdentity) -> Result<OutputLocation> {
        let dir = self.folder_path(&identity);
        fs::create_dir_all(&dir).map_err(|source| PersistenceError::DirectoryCreation {
            path: dir.clone(),
            source,
        })?;
        info!(run = identity.run, dir = %dir.display(), "output directory ready");
        Ok(OutputLocation { identity, dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(hour, minute, 41)
            .unwrap()
    }

    #[test]
    fn folder_name_pads_run_and_uses_twelve_hour_clock() {
        assert_eq!(
            RunIdentity::new(7, at(14, 5)).folder_name(),
            "Output-007__2024-03-09__02-05PM"
        );
        assert_eq!(
            RunIdentity::new(1, at(0, 30)).folder_name(),
            "Output-001__2024-03-09__12-30AM"
        );
        assert_eq!(
            RunIdentity::new(12, at(12, 0)).folder_name(),
            "Output-012__2024-03-09__12-00PM"
        );
    }

    #[test]
    fn wide_run_numbers_keep_all_digits() {
        assert_eq!(
            RunIdentity::new(1234, at(9, 15)).to_string(),
            "Output-1234__2024-03-09__09-15AM"
        );
    }

    #[test]
    fn create_is_idempotent() {
        let dir = tempdir().unwrap();
        let builder = OutputLocationBuilder::new(dir.path());
        let first = builder.create(RunIdentity::new(3, at(10, 0))).unwrap();
        let second = builder.create(RunIdentity::new(3, at(10, 0))).unwrap();

        assert!(first.dir.is_dir());
        assert_eq!(first, second);
        assert_eq!(
            first.artifact("bms_data.xlsx"),
            dir.path()
                .join("Output-003__2024-03-09__10-00AM")
                .join("bms_data.xlsx")
        );
    }

    #[test]
    fn file_in_place_of_root_is_a_directory_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"x").unwrap();

        let err = OutputLocationBuilder::new(&blocker)
            .create(RunIdentity::new(1, at(8, 0)))
            .unwrap_err();
        assert!(matches!(err, PersistenceError::DirectoryCreation { .. }));
    }

    #[test]
    fn working_directory_root_is_not_prefixed() {
        let identity = RunIdentity::new(2, at(9, 5));
        assert_eq!(
            OutputLocationBuilder::new(".").folder_path(&identity),
            PathBuf::from("Output-002__2024-03-09__09-05AM")
        );
        assert_eq!(
            OutputLocationBuilder::new("runs").folder_path(&identity),
            Path::new("runs").join("Output-002__2024-03-09__09-05AM")
        );
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock(at(23, 59));
        assert_eq!(clock.now(), clock.now());
    }
}
