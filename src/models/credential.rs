//! Stored OAuth credential model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// OAuth credential set persisted by the token store.
///
/// One record, single tenant. Created on the first successful
/// authorization, overwritten on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    /// Current access token
    pub access_token: String,
    /// Refresh token (offline access)
    pub refresh_token: String,
    /// When the access token expires (ISO 8601)
    pub expires_at: String,
    /// Token type as reported by Google (always "Bearer" in practice)
    pub token_type: String,
    /// Granted OAuth scopes
    pub scopes: Vec<String>,
}

impl StoredCredential {
    /// Parse the stored expiry timestamp.
    pub fn expires_at(&self) -> Result<DateTime<Utc>, AppError> {
        DateTime::parse_from_rfc3339(&self.expires_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                AppError::MalformedStore(format!("invalid expiry '{}': {}", self.expires_at, e))
            })
    }

    /// Whether the access token expires within the given margin.
    pub fn expires_within(&self, margin: Duration) -> Result<bool, AppError> {
        Ok(Utc::now() + margin >= self.expires_at()?)
    }
}
