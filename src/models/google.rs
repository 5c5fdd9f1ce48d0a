//! Wire types for the Google People API `people.connections.list` response.
//!
//! Only the fields the phonebook needs are modeled; everything else in the
//! payload is ignored. These records are transient — they live for one
//! fetch-translate cycle and are never persisted.

use serde::Deserialize;

/// One page of the connections listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsPage {
    /// Contacts on this page (absent when the account has none).
    #[serde(default)]
    pub connections: Vec<Person>,
    /// Continuation token; absent on the last page.
    pub next_page_token: Option<String>,
    /// Total contacts across all pages, as reported by Google.
    pub total_items: Option<u32>,
}

/// A contact record as returned by the People API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Opaque remote-assigned ID, e.g. "people/c123456789"
    pub resource_name: Option<String>,
    #[serde(default)]
    pub names: Vec<PersonName>,
    #[serde(default)]
    pub phone_numbers: Vec<PersonPhoneNumber>,
}

/// A name record on a contact. Google may return several (contact source,
/// profile); the first one is the primary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// A phone number on a contact, with Google's free-text type label
/// ("home", "work", "mobile", custom strings, or nothing at all).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPhoneNumber {
    pub value: Option<String>,
    pub r#type: Option<String>,
}
