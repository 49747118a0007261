//! IPFS pinning through the Pinata API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ArchivalStore, ArchiveError, ContentId};

const USER_AGENT_VALUE: &str = concat!("certverify/", env!("CARGO_PKG_VERSION"));

/// Pinata connection settings.
///
/// Credentials are read from the environment only and are never serialized.
#[derive(Clone, Serialize, Deserialize)]
pub struct PinataConfig {
    /// API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(skip)]
    pub api_key: Option<String>,

    #[serde(skip)]
    pub api_secret: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// File name attached to the upload.
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_api_url() -> String {
    "https://api.pinata.cloud".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_file_name() -> String {
    "certificate.pdf".to_string()
}

impl fmt::Debug for PinataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinataConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("file_name", &self.file_name)
            .finish()
    }
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            api_secret: None,
            timeout_secs: default_timeout(),
            file_name: default_file_name(),
        }
    }
}

impl PinataConfig {
    /// Overlay environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `PINATA_API_KEY` | API key |
    /// | `PINATA_API_SECRET` | API secret |
    /// | `CERTVERIFY_PINATA_URL` | API base URL |
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var("PINATA_API_KEY") {
            self.api_key = Some(key);
        }
        if let Ok(secret) = std::env::var("PINATA_API_SECRET") {
            self.api_secret = Some(secret);
        }
        if let Ok(url) = std::env::var("CERTVERIFY_PINATA_URL") {
            self.api_url = url;
        }
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_credentials(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self.api_secret = Some(secret.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: Option<String>,
}

/// Archival store that pins documents to IPFS; the content id is the CID.
#[derive(Clone)]
pub struct PinataStore {
    client: reqwest::Client,
    pin_url: String,
    api_key: String,
    api_secret: String,
    file_name: String,
}

impl PinataStore {
    pub fn new(config: PinataConfig) -> Result<Self, ArchiveError> {
        let (api_key, api_secret) = match (config.api_key, config.api_secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => (key, secret),
            _ => {
                return Err(ArchiveError::Config {
                    message: "PINATA_API_KEY and PINATA_API_SECRET must both be set".to_string(),
                })
            }
        };

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ArchiveError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            pin_url: format!(
                "{}/pinning/pinFileToIPFS",
                config.api_url.trim_end_matches('/')
            ),
            api_key,
            api_secret,
            file_name: config.file_name,
        })
    }

    pub fn pin_url(&self) -> &str {
        &self.pin_url
    }
}

impl fmt::Debug for PinataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinataStore")
            .field("pin_url", &self.pin_url)
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ArchivalStore for PinataStore {
    async fn store(&self, document: &[u8]) -> Result<ContentId, ArchiveError> {
        let part = Part::bytes(document.to_vec()).file_name(self.file_name.clone());
        let form = Form::new().part("file", part);

        debug!(url = %self.pin_url, bytes = document.len(), "pinning document");
        let response = self
            .client
            .post(&self.pin_url)
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.api_secret)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArchiveError::Rejected {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let pinned: PinResponse =
            response
                .json()
                .await
                .map_err(|e| ArchiveError::InvalidResponse {
                    message: format!("failed to parse pin response: {}", e),
                })?;

        let hash = pinned
            .ipfs_hash
            .ok_or_else(|| ArchiveError::InvalidResponse {
                message: "pin response has no IpfsHash".to_string(),
            })?;
        ContentId::new(hash)
    }

    fn backend_name(&self) -> &'static str {
        "pinata"
    }
}
