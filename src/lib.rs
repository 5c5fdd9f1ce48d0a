// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Snom-Phonebook: serve a Google Contacts account to Snom desk phones.
//!
//! This crate bridges the Google People API to the `tbook` XML phonebook
//! dialect that Snom telephones poll over plain HTTP.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::{GoogleService, PhonebookService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub google: GoogleService,
    pub phonebook: PhonebookService,
}
