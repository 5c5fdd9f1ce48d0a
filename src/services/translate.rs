// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Translation from Google People records to the phonebook schema.
//!
//! Pure and deterministic: no I/O, output order follows input order.

use crate::models::google::Person;
use crate::models::{NumberKind, PhonebookEntry, PhonebookNumber};

/// Translate fetched contacts into phonebook entries.
///
/// A contact survives only if it has a name record with a non-empty name
/// component and at least one non-empty number after normalization.
/// Everything else is dropped silently; that is routine filtering (no-name
/// "other contacts", email-only records), not an error.
pub fn translate(contacts: &[Person]) -> Vec<PhonebookEntry> {
    contacts.iter().filter_map(translate_one).collect()
}

fn translate_one(person: &Person) -> Option<PhonebookEntry> {
    // First name record wins; Google orders the primary one first.
    let name = person.names.first()?;
    let first_name = name.given_name.clone().unwrap_or_default();
    let last_name = name.family_name.clone().unwrap_or_default();
    if first_name.is_empty() && last_name.is_empty() {
        return None;
    }

    let numbers: Vec<PhonebookNumber> = person
        .phone_numbers
        .iter()
        .filter_map(|phone| {
            let number = normalize_number(phone.value.as_deref()?);
            if number.is_empty() {
                return None;
            }
            Some(PhonebookNumber {
                number,
                kind: map_number_kind(phone.r#type.as_deref()),
            })
        })
        .collect();

    if numbers.is_empty() {
        return None;
    }

    Some(PhonebookEntry {
        first_name,
        last_name,
        numbers,
    })
}

/// Strip all whitespace from a raw phone value.
fn normalize_number(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Closed-set mapping of Google's free-text phone labels, case-insensitive.
/// Unknown or missing labels map to `Other`.
fn map_number_kind(label: Option<&str>) -> NumberKind {
    match label.map(str::to_ascii_lowercase).as_deref() {
        Some("home") => NumberKind::Home,
        Some("work") | Some("main") => NumberKind::Office,
        Some("mobile") => NumberKind::Mobile,
        _ => NumberKind::Other,
    }
}
