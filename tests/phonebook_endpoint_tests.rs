// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Phonebook endpoint availability tests.
//!
//! The central contract: `/phonebook.xml` always answers 200 with a valid
//! `tbook` document, no matter how broken the Google integration is.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use snom_phonebook::models::phonebook::FALLBACK_TBOOK;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_get_without_credentials_serves_fallback() {
    let (app, _state, _dir) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/phonebook.xml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/xml"
    );

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    assert_eq!(std::str::from_utf8(&body).unwrap(), FALLBACK_TBOOK);
}

#[tokio::test]
async fn test_post_is_accepted_and_body_ignored() {
    // Snom phones use POST for directory search; we serve the same document.
    let (app, _state, _dir) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/phonebook.xml")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("search=Maier"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    assert_eq!(std::str::from_utf8(&body).unwrap(), FALLBACK_TBOOK);
}

#[tokio::test]
async fn test_malformed_credential_file_still_serves_200() {
    let (app, state, _dir) = common::create_test_app();
    common::write_credential_file(&state, "{ this is not json");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/phonebook.xml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    assert_eq!(std::str::from_utf8(&body).unwrap(), FALLBACK_TBOOK);
}
