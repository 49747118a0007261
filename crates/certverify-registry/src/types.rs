//! Registry configuration types.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Which backend resolves project identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryBackend {
    /// Fixed table of known projects.
    #[default]
    Static,
    /// Live projects API.
    Http,
}

impl RegistryBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "static" | "mock" => Some(Self::Static),
            "http" | "live" => Some(Self::Http),
            _ => None,
        }
    }
}

/// Registry configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: RegistryBackend,

    /// Base URL for the projects API.
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Bearer token for the projects API. Environment only.
    #[serde(skip)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Table file for the static backend; the built-in table when unset.
    #[serde(default)]
    pub table: Option<PathBuf>,
}

fn default_registry_url() -> String {
    "https://v17.api.carbonmark.com/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            backend: RegistryBackend::default(),
            url: default_registry_url(),
            token: None,
            timeout_secs: default_timeout(),
            table: None,
        }
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("backend", &self.backend)
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("table", &self.table)
            .finish()
    }
}

impl RegistryConfig {
    /// Create config from environment variables, starting from defaults.
    pub fn from_env() -> RegistryResult<Self> {
        Self::default().with_env()
    }

    /// Overlay environment variables on this config.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `CERTVERIFY_REGISTRY_BACKEND` | `static` or `http` |
    /// | `CERTVERIFY_REGISTRY_URL` | API base URL |
    /// | `CERTVERIFY_REGISTRY_TOKEN` | Bearer token |
    /// | `CERTVERIFY_REGISTRY_TIMEOUT` | Timeout in seconds |
    /// | `CERTVERIFY_REGISTRY_TABLE` | Static table file |
    ///
    /// Blank variables are ignored; unparseable ones are a `Config` error.
    pub fn with_env(self) -> RegistryResult<Self> {
        self.with_vars(|name| std::env::var(name).ok())
    }

    fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> RegistryResult<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("CERTVERIFY_REGISTRY_BACKEND") {
            self.backend = RegistryBackend::parse(&v)
                .ok_or_else(|| invalid_var("CERTVERIFY_REGISTRY_BACKEND", &v))?;
        }
        if let Some(url) = var("CERTVERIFY_REGISTRY_URL") {
            self.url = url;
        }
        if let Some(token) = var("CERTVERIFY_REGISTRY_TOKEN") {
            self.token = Some(token);
        }
        if let Some(v) = var("CERTVERIFY_REGISTRY_TIMEOUT") {
            self.timeout_secs = v
                .trim()
                .parse()
                .map_err(|_| invalid_var("CERTVERIFY_REGISTRY_TIMEOUT", &v))?;
        }
        if let Some(table) = var("CERTVERIFY_REGISTRY_TABLE") {
            self.table = Some(PathBuf::from(table));
        }
        Ok(self)
    }

    /// Set the backend.
    pub fn with_backend(mut self, backend: RegistryBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the static table file.
    pub fn with_table(mut self, table: impl Into<PathBuf>) -> Self {
        self.table = Some(table.into());
        self
    }
}

fn invalid_var(name: &str, value: &str) -> RegistryError {
    RegistryError::Config {
        message: format!("invalid value for {}: {}", name, value),
    }
}
