//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; there is no reload path.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Public base URL of this server, used for the OAuth redirect URI
    /// and reported on the status endpoint.
    pub server_url: String,
    /// Server port
    pub port: u16,
    /// Path of the persisted credential file
    pub token_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            server_url: env::var("SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            token_file: env::var("TOKEN_FILE")
                .unwrap_or_else(|_| "token.json".to_string())
                .into(),
        })
    }

    /// Key used to sign the OAuth `state` parameter. Derived from the
    /// client secret so no extra secret needs provisioning.
    pub fn oauth_state_key(&self) -> &[u8] {
        self.google_client_secret.as_bytes()
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            google_client_id: "test_client_id".to_string(),
            google_client_secret: "test_client_secret".to_string(),
            server_url: "http://localhost:3000".to_string(),
            port: 3000,
            token_file: PathBuf::from("token.json"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
