use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

const SESSION_VERSION: u32 = 1;

/// A logged-in admin session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub version: u32,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// `None` when `now + ttl` is past the representable date range.
    pub fn new(token: String, now: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        Some(Self {
            version: SESSION_VERSION,
            token,
            created_at: now,
            expires_at: now.checked_add_signed(ttl)?,
        })
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.version == SESSION_VERSION && now < self.expires_at
    }
}

/// Get the default session file path (~/.config/golf-league/session.json)
pub fn get_session_path() -> PathBuf {
    crate::config::get_config_dir().join("session.json")
}

/// Load the session file. A missing file means "not logged in".
pub fn load_session(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open session file at {}", path.display()))?;

    let session: Session = serde_json::from_reader(file).context("Failed to load session")?;
    Ok(Some(session))
}

/// Save the session file atomically.
pub fn save_session(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, session).context("Failed to serialize session")?;

    file.commit().context("Failed to save session")?;

    Ok(())
}

/// Delete the session file if there is one.
pub fn clear_session(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove session file {}", path.display())),
    }
}
