// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Every layer below the phonebook assembler surfaces a typed error from
//! this taxonomy; only the assembler is allowed to absorb one and degrade
//! to the fallback document.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No credential has been stored yet (first run, never authorized).
    #[error("No stored credential: {0}")]
    NotFound(String),

    /// Authorization-code exchange with Google failed.
    #[error("Token exchange failed: {0}")]
    Exchange(String),

    /// Stored credential was rejected by Google (expired/revoked).
    #[error("Credential rejected: {0}")]
    Auth(String),

    /// Transient transport failure talking to Google.
    #[error("Google API unreachable: {0}")]
    Network(String),

    /// Pagination safety bound exceeded (non-terminating page-token feed).
    #[error("Pagination did not terminate: {0}")]
    Pagination(String),

    /// Persisted credential exists but is unreadable or invalid.
    #[error("Stored credential unreadable: {0}")]
    MalformedStore(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    /// Plain-text responses: the only fallible handlers are the OAuth
    /// routes, whose consumer is a human in a browser. The phonebook and
    /// status endpoints never return an error at all.
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Exchange(_) | AppError::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::Pagination(_) | AppError::MalformedStore(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
