// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google API client for the OAuth flow and contact fetching.
//!
//! Handles:
//! - Authorization URL construction and code exchange
//! - Token refresh when expired (refreshed credentials are persisted)
//! - Paginated retrieval of the full connections list

use serde::Deserialize;

use crate::error::AppError;
use crate::models::{ConnectionsPage, Person, StoredCredential};
use crate::store::TokenStore;

/// Read-only contacts scope requested during authorization.
pub const CONTACTS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/contacts.readonly";

/// Google consent screen base URL.
const CONSENT_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Contacts per page requested from the People API.
const PAGE_SIZE: u32 = 100;

/// Safety bound on sequential page fetches. The People API terminates by
/// omitting `nextPageToken`; this guards a pathological feed that never
/// does (1000 pages = 100k contacts, far beyond any desk-phone directory).
const MAX_PAGES: u32 = 1000;

/// Margin before token expiration when we proactively refresh (5 minutes).
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Low-level Google HTTP client.
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    oauth_base_url: String,
    api_base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleClient {
    /// Create a new Google client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            oauth_base_url: "https://oauth2.googleapis.com".to_string(),
            api_base_url: "https://people.googleapis.com".to_string(),
            client_id,
            client_secret,
            redirect_uri,
        }
    }

    /// Build the consent-screen URL for the authorization redirect.
    ///
    /// Requests offline access (refresh token) and read-only contacts.
    /// Deterministic apart from the caller-supplied `state`.
    pub fn authorization_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&\
             redirect_uri={}&\
             response_type=code&\
             scope={}&\
             access_type=offline&\
             prompt=consent&\
             state={}",
            CONSENT_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(CONTACTS_READONLY_SCOPE),
            state
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(format!("{}/token", self.oauth_base_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Exchange(format!("token exchange request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Google token exchange failed");
            return Err(AppError::Exchange(format!(
                "token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Exchange(format!("failed to parse token response: {}", e)))
    }

    /// Refresh an expired access token.
    ///
    /// A rejected refresh token (revoked access, `invalid_grant`) is an
    /// `Auth` error so callers know not to retry; transport failures are
    /// `Network`.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(format!("{}/token", self.oauth_base_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Network(format!("token refresh request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.is_client_error() {
                return Err(AppError::Auth(format!(
                    "token refresh rejected (HTTP {}): {}",
                    status, body
                )));
            }
            return Err(AppError::Network(format!(
                "token refresh failed (HTTP {})",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("failed to parse refresh response: {}", e)))
    }

    /// Fetch one page of the connections listing.
    pub async fn list_connections(
        &self,
        access_token: &str,
        page_token: Option<&str>,
    ) -> Result<ConnectionsPage, AppError> {
        let url = format!("{}/v1/people/me/connections", self.api_base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("personFields", "names,phoneNumbers".to_string()),
            ("pageSize", PAGE_SIZE.to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("connections request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Rejected credential - distinguishable from transient failures
            // so the caller knows a retry is pointless.
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(AppError::Auth(format!("HTTP {}: {}", status, body)));
            }

            return Err(AppError::Network(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("JSON parse error: {}", e)))
    }
}

/// Token endpoint response (code exchange and refresh share the shape).
///
/// Google omits `refresh_token` on refresh responses; the caller keeps the
/// previously stored one in that case.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
}

impl TokenResponse {
    /// Convert into a storable credential, falling back to a previously
    /// stored refresh token when the response omits one.
    fn into_credential(self, previous_refresh_token: Option<String>) -> StoredCredential {
        let expires_at = chrono::Utc::now() + chrono::Duration::seconds(self.expires_in);
        StoredCredential {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or(previous_refresh_token)
                .unwrap_or_default(),
            expires_at: expires_at.to_rfc3339(),
            token_type: self.token_type,
            scopes: self.scope.split_whitespace().map(str::to_string).collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pagination
// ─────────────────────────────────────────────────────────────────────────────

/// Source of connection pages. The production implementation is
/// `GoogleClient`; tests substitute a scripted fake.
pub trait ConnectionsSource {
    fn list_page(
        &self,
        access_token: &str,
        page_token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<ConnectionsPage, AppError>> + Send;
}

impl ConnectionsSource for GoogleClient {
    async fn list_page(
        &self,
        access_token: &str,
        page_token: Option<&str>,
    ) -> Result<ConnectionsPage, AppError> {
        self.list_connections(access_token, page_token).await
    }
}

/// Fetch the complete contact list, following pagination until the API
/// stops returning a continuation token.
///
/// Pages are fetched strictly sequentially to preserve remote order and
/// keep API usage predictable. The total is unbounded; only a pathological
/// non-terminating token feed is cut off, with `AppError::Pagination`.
pub async fn fetch_all_pages<S: ConnectionsSource>(
    source: &S,
    access_token: &str,
) -> Result<Vec<Person>, AppError> {
    let mut contacts = Vec::new();
    let mut page_token: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let page = source.list_page(access_token, page_token.as_deref()).await?;
        contacts.extend(page.connections);

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => return Ok(contacts),
        }
    }

    Err(AppError::Pagination(format!(
        "no terminal page after {} pages",
        MAX_PAGES
    )))
}

// ─────────────────────────────────────────────────────────────────────────────
// GoogleService - high-level service with token management
// ─────────────────────────────────────────────────────────────────────────────

/// High-level Google service that manages the token lifecycle and API
/// calls against the single configured account.
#[derive(Clone)]
pub struct GoogleService {
    client: GoogleClient,
    store: TokenStore,
}

impl GoogleService {
    pub fn new(
        client_id: String,
        client_secret: String,
        server_url: String,
        store: TokenStore,
    ) -> Self {
        let redirect_uri = format!("{}/auth/google/callback", server_url.trim_end_matches('/'));
        Self {
            client: GoogleClient::new(client_id, client_secret, redirect_uri),
            store,
        }
    }

    /// Build the consent-screen URL for `/auth/google`.
    pub fn authorization_url(&self, state: &str) -> String {
        self.client.authorization_url(state)
    }

    /// Handle the OAuth callback: exchange the code and persist the
    /// credential. The credential is saved before this returns.
    pub async fn handle_oauth_callback(&self, code: &str) -> Result<(), AppError> {
        let token_response = self.client.exchange_code(code).await?;

        // A re-authorization may omit the refresh token if consent was
        // previously granted; keep the stored one in that case.
        let previous_refresh = match self.store.load().await {
            Ok(cred) => Some(cred.refresh_token),
            Err(_) => None,
        };

        let credential = token_response.into_credential(previous_refresh);
        self.store.save(&credential).await?;

        tracing::info!("OAuth code exchanged, credential stored");
        Ok(())
    }

    /// Get a valid (non-expired) access token for the configured account.
    ///
    /// Loads the stored credential, refreshing it via the OAuth endpoint
    /// when it expires within the 5-minute margin. Refreshed credentials
    /// are always persisted back so the next request skips the refresh
    /// round trip.
    pub async fn valid_access_token(&self) -> Result<String, AppError> {
        let credential = self.store.load().await?;

        let margin = chrono::Duration::seconds(TOKEN_REFRESH_MARGIN_SECS);
        if !credential.expires_within(margin)? {
            return Ok(credential.access_token);
        }

        tracing::info!("Access token expired, refreshing");
        let refreshed = self
            .client
            .refresh_token(&credential.refresh_token)
            .await?
            .into_credential(Some(credential.refresh_token));

        self.store.save(&refreshed).await?;
        tracing::info!("Token refreshed and persisted");

        Ok(refreshed.access_token)
    }

    /// Fetch the complete contact list for the configured account.
    pub async fn fetch_all_contacts(&self) -> Result<Vec<Person>, AppError> {
        let access_token = self.valid_access_token().await?;
        let contacts = fetch_all_pages(&self.client, &access_token).await?;
        tracing::debug!(count = contacts.len(), "Fetched contacts from Google");
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::google::PersonName;
    use std::sync::Mutex;

    /// Scripted page source: serves pages keyed by the expected incoming
    /// page token and counts calls.
    struct FakeSource {
        pages: Vec<(Option<&'static str>, ConnectionsPage)>,
        calls: Mutex<Vec<Option<String>>>,
    }

    impl FakeSource {
        fn new(pages: Vec<(Option<&'static str>, ConnectionsPage)>) -> Self {
            Self {
                pages,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl ConnectionsSource for FakeSource {
        async fn list_page(
            &self,
            _access_token: &str,
            page_token: Option<&str>,
        ) -> Result<ConnectionsPage, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push(page_token.map(str::to_string));

            self.pages
                .iter()
                .find(|(expected, _)| *expected == page_token)
                .map(|(_, page)| page.clone())
                .ok_or_else(|| {
                    AppError::Network(format!("unexpected page token {:?}", page_token))
                })
        }
    }

    fn person(given: &str) -> Person {
        Person {
            resource_name: Some(format!("people/{}", given)),
            names: vec![PersonName {
                given_name: Some(given.to_string()),
                family_name: None,
            }],
            phone_numbers: vec![],
        }
    }

    fn page(contacts: Vec<Person>, next: Option<&str>) -> ConnectionsPage {
        ConnectionsPage {
            connections: contacts,
            next_page_token: next.map(str::to_string),
            total_items: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_all_pages_concatenates_in_order() {
        let source = FakeSource::new(vec![
            (None, page(vec![person("a"), person("b")], Some("tok-b"))),
            (Some("tok-b"), page(vec![person("c")], Some("tok-c"))),
            (Some("tok-c"), page(vec![person("d")], None)),
        ]);

        let contacts = fetch_all_pages(&source, "token").await.unwrap();

        assert_eq!(source.call_count(), 3);
        let order: Vec<_> = contacts
            .iter()
            .map(|p| p.names[0].given_name.as_deref().unwrap())
            .collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_empty_token_terminates() {
        // An empty-string continuation token counts as terminal.
        let source = FakeSource::new(vec![(None, page(vec![person("a")], Some("")))]);

        let contacts = fetch_all_pages(&source, "token").await.unwrap();
        assert_eq!(source.call_count(), 1);
        assert_eq!(contacts.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_single_empty_account() {
        let source = FakeSource::new(vec![(None, page(vec![], None))]);
        let contacts = fetch_all_pages(&source, "token").await.unwrap();
        assert!(contacts.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_pages_guards_nonterminating_feed() {
        /// Always returns the same continuation token.
        struct LoopingSource;

        impl ConnectionsSource for LoopingSource {
            async fn list_page(
                &self,
                _access_token: &str,
                _page_token: Option<&str>,
            ) -> Result<ConnectionsPage, AppError> {
                Ok(ConnectionsPage {
                    connections: vec![],
                    next_page_token: Some("again".to_string()),
                    total_items: None,
                })
            }
        }

        let err = fetch_all_pages(&LoopingSource, "token").await.unwrap_err();
        assert!(matches!(err, AppError::Pagination(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_pages_propagates_auth_error() {
        struct RejectingSource;

        impl ConnectionsSource for RejectingSource {
            async fn list_page(
                &self,
                _access_token: &str,
                _page_token: Option<&str>,
            ) -> Result<ConnectionsPage, AppError> {
                Err(AppError::Auth("HTTP 401".to_string()))
            }
        }

        let err = fetch_all_pages(&RejectingSource, "token").await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_authorization_url_contents() {
        let client = GoogleClient::new(
            "client-123".to_string(),
            "secret".to_string(),
            "http://localhost:3000/auth/google/callback".to_string(),
        );

        let url = client.authorization_url("st4te");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("contacts.readonly"));
        assert!(url.contains("state=st4te"));
        assert!(url.contains(&urlencoding::encode("http://localhost:3000/auth/google/callback").into_owned()));
    }

    #[test]
    fn test_token_response_keeps_previous_refresh_token() {
        let response = TokenResponse {
            access_token: "new-at".to_string(),
            refresh_token: None,
            expires_in: 3600,
            token_type: "Bearer".to_string(),
            scope: CONTACTS_READONLY_SCOPE.to_string(),
        };

        let credential = response.into_credential(Some("old-rt".to_string()));
        assert_eq!(credential.access_token, "new-at");
        assert_eq!(credential.refresh_token, "old-rt");
        assert_eq!(credential.scopes, vec![CONTACTS_READONLY_SCOPE]);
    }
}
