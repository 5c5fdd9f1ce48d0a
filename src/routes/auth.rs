// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth authentication routes.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, Result};
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", get(auth_start))
        .route("/auth/google/callback", get(auth_callback))
}

/// Start OAuth flow - redirect (302) to the Google consent screen.
async fn auth_start(State(state): State<Arc<AppState>>) -> Result<Response> {
    let oauth_state = sign_state(state.config.oauth_state_key())?;
    let auth_url = state.google.authorization_url(&oauth_state);

    tracing::info!(
        client_id = %state.config.google_client_id,
        "Starting OAuth flow, redirecting to Google"
    );

    Ok((StatusCode::FOUND, [(header::LOCATION, auth_url)]).into_response())
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - verify state, exchange the code, persist the credential.
///
/// On failure the browser gets a plain-text 500 (via `AppError`); the
/// phonebook endpoint is unaffected either way.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Html<&'static str>> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        return Err(AppError::Exchange(format!("Google returned: {}", error)));
    }

    let oauth_state = params
        .state
        .ok_or_else(|| AppError::Exchange("missing state parameter".to_string()))?;
    if !verify_state(&oauth_state, state.config.oauth_state_key()) {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return Err(AppError::Exchange("invalid state parameter".to_string()));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::Exchange("missing authorization code".to_string()))?;

    tracing::info!("Exchanging authorization code for tokens");
    state.google.handle_oauth_callback(&code).await?;

    Ok(Html(
        "<html><body>\
         <h1>Google account connected</h1>\
         <p>The phonebook is now served from your Google contacts. \
         You can close this window.</p>\
         </body></html>",
    ))
}

/// Sign a timestamp nonce as the OAuth `state` parameter.
///
/// Format before encoding: "timestamp_hex|signature_hex", base64url-encoded
/// for the URL.
fn sign_state(secret: &[u8]) -> Result<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    let payload = format!("{:x}", timestamp);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Ok(URL_SAFE_NO_PAD.encode(format!("{}|{}", payload, signature).as_bytes()))
}

/// Verify the HMAC signature on the OAuth state parameter.
fn verify_state(state: &str, secret: &[u8]) -> bool {
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(state) else {
        return false;
    };
    let Ok(state_str) = String::from_utf8(bytes) else {
        return false;
    };

    let parts: Vec<&str> = state_str.splitn(2, '|').collect();
    if parts.len() != 2 {
        return false;
    }
    let (payload, signature_hex) = (parts[0], parts[1]);

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload.as_bytes());
    let expected_signature = hex::encode(mac.finalize().into_bytes());

    signature_hex == expected_signature
}
