//! ---
//! ems_section: "03-persistence-logging"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Run counter persistence and output folder bindings."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Persistence for the dashboard pipeline: the run counter that numbers
//! output folders and the builder that creates one folder per run.

use std::path::PathBuf;

/// Result alias used throughout the persistence crate.
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Error type for the persistence subsystem.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The counter file exists but does not hold an unsigned integer.
    #[error("counter file {} is corrupt: {content:?} is not a run number", .path.display())]
    CounterCorrupt {
        /// Location of the counter file.
        path: PathBuf,
        /// Raw file content, untrimmed.
        content: String,
        /// Underlying parse failure.
        #[source]
        source: std::num::ParseIntError,
    },
    /// The counter reached `u64::MAX` and cannot be incremented.
    #[error("counter file {} is exhausted", .path.display())]
    CounterOverflow {
        /// Location of the counter file.
        path: PathBuf,
    },
    /// Reading or writing the counter file failed.
    #[error("counter file {} io error: {source}", .path.display())]
    CounterIo {
        /// Location of the counter file.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The run output directory could not be created.
    #[error("unable to create output directory {}: {source}", .path.display())]
    DirectoryCreation {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}

pub mod counter;
pub mod output;

pub use counter::{CounterStore, FileCounterStore, MemoryCounterStore};
pub use output::{Clock, FixedClock, OutputLocation, OutputLocationBuilder, RunIdentity, SystemClock};
