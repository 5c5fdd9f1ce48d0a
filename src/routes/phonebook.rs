// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The device-facing phonebook endpoint.
//!
//! Snom phones poll this with GET; some firmware variants use POST (e.g.
//! for directory search), so both are accepted and the body is ignored.
//! This path never returns a non-200 status: when the pipeline cannot
//! produce live data the response is the fallback document.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/phonebook.xml", get(serve_phonebook).post(serve_phonebook))
}

/// Run the assembly pipeline and serve the resulting document.
async fn serve_phonebook(State(state): State<Arc<AppState>>) -> Response {
    let outcome = state.phonebook.sync().await;
    let body = outcome.tbook();

    ([(header::CONTENT_TYPE, "text/xml")], body).into_response()
}
