//! Content-addressed archival of accepted documents.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod local;
mod pinata;

pub use local::LocalContentStore;
pub use pinata::{PinataConfig, PinataStore};

/// Archival errors.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// Local filesystem failure.
    #[error("archive io error: {message}")]
    Io { message: String },

    /// Transport failure talking to a remote store.
    #[error("network error: {message}")]
    Network { message: String },

    /// Remote store answered with a non-success status.
    #[error("store rejected upload (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Remote store answered success but without a usable identifier.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Store is not usable with the given configuration.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Requested content is not in the store.
    #[error("content not found: {cid}")]
    NotFound { cid: String },
}

impl From<reqwest::Error> for ArchiveError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Stable identifier derived from archived content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Wrap an identifier; blank identifiers are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, ArchiveError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ArchiveError::InvalidResponse {
                message: "empty content identifier".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable, content-addressed store: identical bytes always map to the same
/// identifier.
#[async_trait]
pub trait ArchivalStore: Send + Sync {
    async fn store(&self, document: &[u8]) -> Result<ContentId, ArchiveError>;

    fn backend_name(&self) -> &'static str {
        "archive"
    }
}
