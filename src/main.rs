// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Snom XML Phonebook Server
//!
//! Serves a desk-phone phonebook assembled live from a Google Contacts
//! account. Phones poll `/phonebook.xml`; the admin connects the Google
//! account once via `/auth/google`.

use snom_phonebook::{
    config::Config,
    services::{GoogleService, PhonebookService},
    store::TokenStore,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Snom phonebook server");

    // Token store backed by a local JSON file
    let store = TokenStore::new(config.token_file.clone());
    tracing::info!(path = %config.token_file.display(), "Token store initialized");

    // Google OAuth + People API service
    let google = GoogleService::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.server_url.clone(),
        store,
    );

    // Phonebook pipeline (fetch → translate → render)
    let phonebook = PhonebookService::new(google.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        google,
        phonebook,
    });

    let app = snom_phonebook::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        phonebook_url = %format!("{}/phonebook.xml", config.server_url),
        "Server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize logging with an env-filter (RUST_LOG) override.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snom_phonebook=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
