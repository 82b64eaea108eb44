//! ---
//! ems_section: "03-persistence-logging"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Run counter persistence and output folder bindings."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{PersistenceError, Result};

/// Source of monotonically increasing run numbers.
pub trait CounterStore {
    /// Reserve and return the next run number.
    fn next(&mut self) -> Result<u64>;
}

/// Counter persisted as a single decimal integer in a plain text file.
///
/// The read-modify-write is not atomic and takes no lock. Two processes
/// sharing the same file may observe the same value and hand out a duplicate
/// run number.
#[derive(Debug, Clone)]
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    /// Bind a counter to `path`. The file is not touched until [`CounterStore::next`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value currently persisted, `0` when the file does not exist yet.
    pub fn current(&self) -> Result<u64> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(PersistenceError::CounterIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        content
            .trim()
            .parse::<u64>()
            .map_err(|source| PersistenceError::CounterCorrupt {
                path: self.path.clone(),
                content,
                source,
            })
    }
}

impl CounterStore for FileCounterStore {
    fn next(&mut self) -> Result<u64> {
        let current = self.current()?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| PersistenceError::CounterOverflow {
                path: self.path.clone(),
            })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| PersistenceError::CounterIo {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        fs::write(&self.path, next.to_string()).map_err(|source| PersistenceError::CounterIo {
            path: self.path.clone(),
            source,
        })?;

        debug!(counter = %self.path.display(), previous = current, next, "run counter advanced");
        Ok(next)
    }
}

/// In-memory counter for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryCounterStore {
    value: u64,
}

impl MemoryCounterStore {
    /// Start from `value`; the first [`CounterStore::next`] returns `value + 1`.
    pub fn starting_at(value: u64) -> Self {
        Self { value }
    }

    /// Last value handed out.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl CounterStore for MemoryCounterStore {
    fn next(&mut self) -> Result<u64> {
        self.value = self
            .value
            .checked_add(1)
            .ok_or_else(|| PersistenceError::CounterOverflow {
                path: PathBuf::from("<memory>"),
            })?;
        Ok(self.value)
    }
}
