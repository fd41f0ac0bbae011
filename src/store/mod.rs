//! The league store: one JSON blob under a single fixed key, read and written whole.

pub mod guarded;
pub mod memory;
pub mod storage;

pub use guarded::AuthorizedStore;
pub use memory::MemoryStore;
pub use storage::{FallbackStore, FileStore};

use thiserror::Error;

use crate::league::LeagueData;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached (I/O failure)
    #[error("League store unavailable: {0}")]
    Unavailable(String),

    /// The stored blob exists but is not valid league data
    #[error("League data is corrupt: {0}")]
    Corrupt(String),

    #[error("Not authorized to change league data (run `golf-league login`)")]
    Unauthorized,
}

/// Get/set storage for the whole league. Writes replace the previous snapshot
/// entirely; concurrent writers are not coordinated (last write wins).
pub trait LeagueStore {
    fn read(&self) -> Result<LeagueData, StoreError>;
    fn write(&self, data: &LeagueData) -> Result<(), StoreError>;
}

impl<S: LeagueStore + ?Sized> LeagueStore for Box<S> {
    fn read(&self) -> Result<LeagueData, StoreError> {
        (**self).read()
    }

    fn write(&self, data: &LeagueData) -> Result<(), StoreError> {
        (**self).write(data)
    }
}
