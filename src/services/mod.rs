// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod google;
pub mod phonebook;
pub mod translate;

pub use google::{GoogleClient, GoogleService};
pub use phonebook::{PhonebookService, SyncOutcome};
