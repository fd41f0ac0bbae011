use atomic_write_file::AtomicWriteFile;
use log::{debug, warn};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::memory::MemoryStore;
use super::{LeagueStore, StoreError};
use crate::league::LeagueData;

/// League data in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeagueStore for FileStore {
    /// Load league data. A missing file is a new league, not an error.
    fn read(&self) -> Result<LeagueData, StoreError> {
        if !self.path.exists() {
            debug!("No league file at {}, starting from defaults", self.path.display());
            return Ok(LeagueData::default());
        }

        let file = File::open(&self.path).map_err(|e| {
            StoreError::Unavailable(format!("failed to open {}: {}", self.path.display(), e))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            if e.is_io() {
                StoreError::Unavailable(format!("failed to read {}: {}", self.path.display(), e))
            } else {
                StoreError::Corrupt(format!("{}: {}", self.path.display(), e))
            }
        })
    }

    /// Save league data atomically; the file is never left half-written.
    fn write(&self, data: &LeagueData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let mut file = AtomicWriteFile::open(&self.path).map_err(|e| {
            StoreError::Unavailable(format!(
                "failed to open atomic write file at {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::to_writer_pretty(&mut file, data)
            .map_err(|e| StoreError::Unavailable(format!("failed to serialize league data: {}", e)))?;

        file.commit().map_err(|e| {
            StoreError::Unavailable(format!("failed to save {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }
}

/// A primary store backed by an in-process one. When the primary is
/// unavailable, reads and writes go to memory instead; those writes are lost
/// when the process exits. Corrupt data is reported, never papered over.
pub struct FallbackStore<S> {
    primary: S,
    fallback: MemoryStore,
}

impl<S: LeagueStore> FallbackStore<S> {
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            fallback: MemoryStore::new(),
        }
    }
}

impl<S: LeagueStore> LeagueStore for FallbackStore<S> {
    fn read(&self) -> Result<LeagueData, StoreError> {
        match self.primary.read() {
            Err(StoreError::Unavailable(reason)) => {
                warn!("{}; using in-memory league data", reason);
                self.fallback.read()
            }
            other => other,
        }
    }

    fn write(&self, data: &LeagueData) -> Result<(), StoreError> {
        match self.primary.write(data) {
            Err(StoreError::Unavailable(reason)) => {
                warn!("{}; changes kept in memory only", reason);
                self.fallback.write(data)
            }
            other => other,
        }
    }
}
