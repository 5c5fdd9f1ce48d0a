// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Phonebook assembler: token store → contact fetch → translation → XML.
//!
//! The central contract lives here: `sync` never fails. Whatever breaks
//! upstream — no credential yet, revoked access, Google unreachable — the
//! phones still get a valid document, and the failure detail is only
//! visible on the status endpoint and in the logs.

use crate::error::AppError;
use crate::models::phonebook::{render_tbook, FALLBACK_TBOOK};
use crate::models::PhonebookEntry;
use crate::services::google::GoogleService;
use crate::services::translate::translate;

/// Terminal state of one pipeline run.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Contacts fetched and translated.
    Success(Vec<PhonebookEntry>),
    /// No credential stored yet; no network I/O was attempted.
    NoCredentials,
    /// Google rejected the stored credential (or it is unreadable).
    AuthFailed(String),
    /// Transient failure (transport, pagination bound).
    Unavailable(String),
}

impl SyncOutcome {
    /// Render the document for this outcome. Success renders the live
    /// phonebook; every other state yields the fixed fallback document.
    pub fn tbook(&self) -> String {
        match self {
            SyncOutcome::Success(entries) => render_tbook(entries),
            _ => FALLBACK_TBOOK.to_string(),
        }
    }

    /// Human-readable failure reason, if any.
    pub fn error_message(&self) -> Option<String> {
        match self {
            SyncOutcome::Success(_) => None,
            SyncOutcome::NoCredentials => Some(
                "Not connected to Google. Visit /auth/google to authorize.".to_string(),
            ),
            SyncOutcome::AuthFailed(msg) | SyncOutcome::Unavailable(msg) => Some(msg.clone()),
        }
    }
}

/// Phonebook assembly service.
#[derive(Clone)]
pub struct PhonebookService {
    google: GoogleService,
}

impl PhonebookService {
    pub fn new(google: GoogleService) -> Self {
        Self { google }
    }

    /// Run the full pipeline once. Infallible by design: errors are folded
    /// into the outcome, never propagated.
    pub async fn sync(&self) -> SyncOutcome {
        match self.google.fetch_all_contacts().await {
            Ok(contacts) => {
                let entries = translate(&contacts);
                tracing::info!(
                    fetched = contacts.len(),
                    translated = entries.len(),
                    "Phonebook assembled"
                );
                SyncOutcome::Success(entries)
            }
            Err(err) => outcome_from_error(err),
        }
    }
}

/// Fold a pipeline error into its terminal state.
fn outcome_from_error(err: AppError) -> SyncOutcome {
    match err {
        AppError::NotFound(_) => {
            tracing::info!("No stored credential, serving fallback phonebook");
            SyncOutcome::NoCredentials
        }
        err @ (AppError::Auth(_) | AppError::MalformedStore(_) | AppError::Exchange(_)) => {
            tracing::warn!(error = %err, "Credential failure, serving fallback phonebook");
            SyncOutcome::AuthFailed(err.to_string())
        }
        err => {
            tracing::warn!(error = %err, "Contact fetch failed, serving fallback phonebook");
            SyncOutcome::Unavailable(err.to_string())
        }
    }
}
