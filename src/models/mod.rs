// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod credential;
pub mod google;
pub mod phonebook;

pub use credential::StoredCredential;
pub use google::{ConnectionsPage, Person};
pub use phonebook::{NumberKind, PhonebookEntry, PhonebookNumber};
