pub mod prompt;
pub mod session;

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub use prompt::prompt_for_login;
pub use session::{clear_session, get_session_path, load_session, save_session, Session};

/// Environment variable holding the admin username (default "admin")
pub const ENV_USERNAME_VAR: &str = "GOLF_LEAGUE_USERNAME";
/// Environment variable holding the admin password (default "golf")
pub const ENV_PASSWORD_VAR: &str = "GOLF_LEAGUE_PASSWORD";

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "golf";
const TOKEN_SALT: &str = "golf-league-salt";

/// Decides whether the current caller may write league data.
pub trait AuthGate {
    fn is_authorized(&self) -> bool;
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Session error: {0}")]
    Session(String),
}

/// The single admin account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from GOLF_LEAGUE_USERNAME / GOLF_LEAGUE_PASSWORD,
    /// falling back to the defaults for unset or blank variables.
    pub fn from_env() -> Self {
        Self::new(
            env_or(ENV_USERNAME_VAR, DEFAULT_USERNAME),
            env_or(ENV_PASSWORD_VAR, DEFAULT_PASSWORD),
        )
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    /// Session token these credentials produce.
    pub fn token(&self) -> String {
        make_token(&self.username, &self.password)
    }
}

fn env_or(var: &str, default: &str) -> String {
    match std::env::var(var) {
        Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Lowercase hex SHA-256 of `"{username}:{password}:golf-league-salt"`.
pub fn make_token(username: &str, password: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}:{}", username, password, TOKEN_SALT).as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Verify a login and persist a session that lasts `ttl`.
pub fn login(
    credentials: &Credentials,
    username: &str,
    password: &str,
    ttl: Duration,
    session_path: &Path,
) -> Result<Session, AuthError> {
    if !credentials.matches(username, password) {
        return Err(AuthError::InvalidCredentials);
    }

    let ttl = chrono::Duration::from_std(ttl)
        .map_err(|_| AuthError::Session("session_ttl is too long".to_string()))?;
    let session = Session::new(credentials.token(), Utc::now(), ttl)
        .ok_or_else(|| AuthError::Session("session_ttl is too long".to_string()))?;

    save_session(session_path, &session).map_err(|e| AuthError::Session(format!("{:#}", e)))?;
    Ok(session)
}

/// End the session. Logging out without a session is fine.
pub fn logout(session_path: &Path) -> Result<(), AuthError> {
    clear_session(session_path).map_err(|e| AuthError::Session(format!("{:#}", e)))
}

/// Authorizes callers holding an unexpired session whose token matches the
/// current credentials. Changing the password invalidates old sessions.
#[derive(Debug, Clone)]
pub struct SessionGate {
    session_path: PathBuf,
    expected_token: String,
}

impl SessionGate {
    pub fn new(session_path: impl Into<PathBuf>, credentials: &Credentials) -> Self {
        Self {
            session_path: session_path.into(),
            expected_token: credentials.token(),
        }
    }
}

impl AuthGate for SessionGate {
    fn is_authorized(&self) -> bool {
        match load_session(&self.session_path) {
            Ok(Some(session)) => session.is_valid_at(Utc::now()) && session.token == self.expected_token,
            _ => false,
        }
    }
}
