// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diagnostic API routes (dashboard-facing).

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::services::SyncOutcome;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/status", get(get_status))
}

/// Status report for operators.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub authenticated: bool,
    pub auth_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts_count: Option<usize>,
    pub server_url: String,
}

/// Report the integration state. Diagnostic only: runs the same pipeline
/// as the phonebook endpoint, mutates nothing, and never errors — every
/// failure collapses into `authenticated: false` plus a readable reason.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let outcome = state.phonebook.sync().await;

    let contacts_count = match &outcome {
        SyncOutcome::Success(entries) => Some(entries.len()),
        _ => None,
    };

    Json(StatusResponse {
        authenticated: contacts_count.is_some(),
        auth_error: outcome.error_message(),
        contacts_count,
        server_url: state.config.server_url.clone(),
    })
}
