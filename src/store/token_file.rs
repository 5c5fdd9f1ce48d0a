// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed token store.
//!
//! Persists the single OAuth credential set as a JSON file. Writes go to a
//! sibling temp file which is flushed and renamed over the target, so a
//! concurrent reader never observes a partially written credential.
//!
//! Single-writer assumption: one server process, writes only happen during
//! (re-)authorization and token refresh. There is no cross-process locking;
//! concurrent re-authorization from two browser tabs is a known gap.

use std::path::PathBuf;

use tokio::io::AsyncWriteExt;

use crate::error::AppError;
use crate::models::StoredCredential;

/// Token store backed by a local JSON file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted credential.
    ///
    /// `AppError::NotFound` if no authorization has happened yet;
    /// `AppError::MalformedStore` if the file exists but cannot be parsed.
    pub async fn load(&self) -> Result<StoredCredential, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "no credential file at {}",
                    self.path.display()
                )));
            }
            Err(e) => {
                return Err(AppError::MalformedStore(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::MalformedStore(format!("failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Overwrite the persisted credential atomically (write temp, flush,
    /// rename).
    pub async fn save(&self, credential: &StoredCredential) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(credential)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize credential: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");

        let mut file = tokio::fs::File::create(&tmp_path).await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("create {}: {}", tmp_path.display(), e))
        })?;
        file.write_all(&json).await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("write {}: {}", tmp_path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("flush {}: {}", tmp_path.display(), e))
        })?;
        drop(file);

        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "rename {} -> {}: {}",
                tmp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %self.path.display(), "Credential persisted");
        Ok(())
    }
}
