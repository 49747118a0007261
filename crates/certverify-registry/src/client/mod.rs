//! Live registry client.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use certverify_core::{ProjectRecord, ProjectRegistry, RegistryRecord};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::identifier::is_valid_project_id;
use crate::types::RegistryConfig;

mod http;

use http::HttpBackend;

const USER_AGENT_VALUE: &str = concat!("certverify-registry/", env!("CARGO_PKG_VERSION"));

/// Registry backed by a projects API: `GET {base}/projects/{id}`.
#[derive(Clone)]
pub struct HttpRegistry {
    http: HttpBackend,
}

impl fmt::Debug for HttpRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRegistry")
            .field("base_url", &self.http.base_url)
            .field("authenticated", &self.http.token.is_some())
            .finish()
    }
}

impl HttpRegistry {
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| RegistryError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let base_url = config.url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(RegistryError::Config {
                message: "registry URL is empty".to_string(),
            });
        }

        Ok(Self {
            http: HttpBackend {
                client,
                base_url,
                token: config.token.filter(|t| !t.is_empty()),
            },
        })
    }

    pub fn from_env() -> RegistryResult<Self> {
        Self::new(RegistryConfig::from_env()?)
    }

    /// Fetch a project record.
    pub async fn fetch_project(&self, project_id: &str) -> RegistryResult<ProjectRecord> {
        let project_id = project_id.trim();
        if !is_valid_project_id(project_id) {
            return Err(RegistryError::NotFound {
                project_id: project_id.to_string(),
            });
        }

        let url = self.project_url(project_id);
        debug!(url = %url, "fetching project record");

        let value = self.http.fetch_project(&url, project_id).await?;
        ProjectRecord::from_value(value).ok_or_else(|| RegistryError::InvalidResponse {
            message: "project response is not a JSON object".to_string(),
        })
    }

    fn project_url(&self, project_id: &str) -> String {
        format!("{}/projects/{}", self.http.base_url, project_id)
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.token.is_some()
    }
}

#[async_trait]
impl ProjectRegistry for HttpRegistry {
    async fn lookup(&self, project_id: &str) -> RegistryRecord {
        match self.fetch_project(project_id).await {
            Ok(record) => RegistryRecord::Found(record),
            Err(RegistryError::NotFound { .. }) => RegistryRecord::NotFound,
            Err(e) => RegistryRecord::LookupError(e.to_string()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_url_strips_trailing_slash() {
        let registry =
            HttpRegistry::new(RegistryConfig::default().with_url("https://example.test/api/"))
                .unwrap();
        assert_eq!(registry.base_url(), "https://example.test/api");
        assert_eq!(
            registry.project_url("VCS-875"),
            "https://example.test/api/projects/VCS-875"
        );
    }

    #[test]
    fn test_empty_url_is_config_error() {
        let result = HttpRegistry::new(RegistryConfig::default().with_url("/"));
        assert!(matches!(result, Err(RegistryError::Config { .. })));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let registry = HttpRegistry::new(RegistryConfig::default().with_token("")).unwrap();
        assert!(!registry.is_authenticated());
    }
}
