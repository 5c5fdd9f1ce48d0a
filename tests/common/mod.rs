// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use snom_phonebook::config::Config;
use snom_phonebook::routes::create_router;
use snom_phonebook::services::{GoogleService, PhonebookService};
use snom_phonebook::store::TokenStore;
use snom_phonebook::AppState;
use std::sync::Arc;

/// Create a test app backed by a token store in a fresh temp directory.
///
/// No mock network: tests only exercise paths that never leave the
/// process (missing or malformed credential file, OAuth URL building).
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");

    let mut config = Config::test_default();
    config.token_file = dir.path().join("token.json");

    let store = TokenStore::new(config.token_file.clone());
    let google = GoogleService::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.server_url.clone(),
        store,
    );
    let phonebook = PhonebookService::new(google.clone());

    let state = Arc::new(AppState {
        config,
        google,
        phonebook,
    });

    (create_router(state.clone()), state, dir)
}

/// Write raw bytes as the stored credential file.
#[allow(dead_code)]
pub fn write_credential_file(state: &AppState, contents: &str) {
    std::fs::write(&state.config.token_file, contents).expect("write credential file");
}
