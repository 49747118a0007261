//! HTTP layer: status mapping for project lookups.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes. There is no retry loop: a failed lookup is
//! reported once and the caller decides.

use reqwest::header::AUTHORIZATION;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};

/// HTTP backend for making requests (holds reqwest client, token, base URL).
#[derive(Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl HttpBackend {
    /// GET a project document. 404 => `NotFound`.
    pub(crate) async fn fetch_project(
        &self,
        url: &str,
        project_id: &str,
    ) -> RegistryResult<serde_json::Value> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "registry responded");

        match status.as_u16() {
            200..=299 => response
                .json()
                .await
                .map_err(|e| RegistryError::InvalidResponse {
                    message: format!("failed to parse project response: {}", e),
                }),

            401 | 403 => Err(RegistryError::Unauthorized {
                message: format!("HTTP {}", status.as_u16()),
            }),

            404 => Err(RegistryError::NotFound {
                project_id: project_id.to_string(),
            }),

            429 => Err(RegistryError::RateLimited),

            _ => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(RegistryError::Network {
                    message: format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        message.chars().take(200).collect::<String>()
                    ),
                })
            }
        }
    }
}
