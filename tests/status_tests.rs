// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Status endpoint tests.
//!
//! `/api/status` is diagnostic only: it must never error, and every
//! failure path collapses into `authenticated: false` plus a readable
//! `authError`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn get_status_json(app: axum::Router) -> serde_json::Value {
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_status_without_credentials() {
    let (app, _state, _dir) = common::create_test_app();

    let status = get_status_json(app).await;

    assert_eq!(status["authenticated"], false);
    assert!(status["authError"].is_string());
    assert_eq!(status["serverUrl"], "http://localhost:3000");
    // contactsCount is omitted entirely when there is no live data.
    assert!(status.get("contactsCount").is_none());
}

#[tokio::test]
async fn test_status_with_malformed_credential_file() {
    let (app, state, _dir) = common::create_test_app();
    common::write_credential_file(&state, "{\"access_token\": 42}");

    let status = get_status_json(app).await;

    assert_eq!(status["authenticated"], false);
    let auth_error = status["authError"].as_str().unwrap();
    assert!(!auth_error.is_empty());
}
