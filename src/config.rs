//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Session file name under the user's home directory.
const DEFAULT_SESSION_FILE: &str = ".agastya-reports/session.json";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the report generation API (no trailing slash)
    pub api_base_url: String,
    /// Organizational email domain required for login
    pub email_domain: String,
    /// Path of the persisted session file
    pub session_path: PathBuf,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            email_domain: "agastya.org".to_string(),
            session_path: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `AGASTYA_API_URL` is required; everything else has a sensible default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("AGASTYA_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("AGASTYA_API_URL"))?,
            email_domain: env::var("AGASTYA_EMAIL_DOMAIN")
                .map(|v| v.trim().trim_start_matches('@').to_string())
                .unwrap_or_else(|_| "agastya.org".to_string()),
            session_path: env::var("AGASTYA_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_path()),
        })
    }
}

/// Default session path under the home directory, falling back to a
/// relative path when the home directory cannot be resolved.
fn default_session_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_SESSION_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
