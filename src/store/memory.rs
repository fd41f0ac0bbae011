use std::sync::Mutex;

use super::{LeagueStore, StoreError};
use crate::league::LeagueData;

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Option<LeagueData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeagueStore for MemoryStore {
    fn read(&self) -> Result<LeagueData, StoreError> {
        let guard = self
            .data
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("memory store poisoned: {}", e)))?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn write(&self, data: &LeagueData) -> Result<(), StoreError> {
        let mut guard = self
            .data
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("memory store poisoned: {}", e)))?;
        *guard = Some(data.clone());
        Ok(())
    }
}
