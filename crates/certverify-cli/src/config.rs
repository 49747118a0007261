//! Process configuration: YAML file, then environment, then CLI flags.
//!
//! Loaded once at startup. Secrets (registry token, Pinata credentials) are
//! only ever taken from the environment.

use std::path::{Path, PathBuf};

use certverify_core::archive::PinataConfig;
use certverify_core::VerificationPolicy;
use certverify_registry::{RegistryConfig, RegistryError};
use serde::{Deserialize, Serialize};

use crate::cli::GlobalArgs;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveBackend {
    #[default]
    Local,
    Pinata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveSettings {
    #[serde(default)]
    pub backend: ArchiveBackend,

    /// Root of the local archive; a per-user data directory when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default)]
    pub pinata: PinataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorSettings {
    /// External OCR program; documents are treated as UTF-8 text when unset.
    #[serde(default)]
    pub command: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_ocr_timeout")]
    pub timeout_secs: u64,
}

fn default_ocr_timeout() -> u64 {
    60
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            timeout_secs: default_ocr_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    #[serde(default)]
    pub policy: VerificationPolicy,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub archive: ArchiveSettings,

    #[serde(default)]
    pub extractor: ExtractorSettings,

    /// Upper bound for one whole verification.
    #[serde(default = "default_verify_timeout")]
    pub verify_timeout_secs: u64,
}

fn default_verify_timeout() -> u64 {
    120
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            policy: VerificationPolicy::default(),
            registry: RegistryConfig::default(),
            archive: ArchiveSettings::default(),
            extractor: ExtractorSettings::default(),
            verify_timeout_secs: default_verify_timeout(),
        }
    }
}

impl VerifierConfig {
    /// Resolve the effective configuration for this process.
    pub fn resolve(args: &GlobalArgs) -> Result<Self, ConfigError> {
        let base = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env()?.with_args(args))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Overlay environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `CERTVERIFY_MIN_TRUST_SCORE` | Minimum accepted score |
    /// | `CERTVERIFY_ARCHIVE_BACKEND` | `local` or `pinata` |
    /// | `CERTVERIFY_ARCHIVE_DIR` | Local archive root |
    /// | `CERTVERIFY_OCR_COMMAND` | OCR program |
    /// | `CERTVERIFY_OCR_ARGS` | Whitespace-separated OCR arguments |
    /// | `CERTVERIFY_VERIFY_TIMEOUT` | Whole-verification timeout in seconds |
    ///
    /// Registry and Pinata variables are documented on their own configs.
    pub fn with_env(mut self) -> Result<Self, ConfigError> {
        if let Some(v) = env_var("CERTVERIFY_MIN_TRUST_SCORE") {
            self.policy.min_trust_score = parse_env("CERTVERIFY_MIN_TRUST_SCORE", &v)?;
        }
        if let Some(v) = env_var("CERTVERIFY_ARCHIVE_BACKEND") {
            self.archive.backend = match v.trim().to_ascii_lowercase().as_str() {
                "local" => ArchiveBackend::Local,
                "pinata" | "ipfs" => ArchiveBackend::Pinata,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: "CERTVERIFY_ARCHIVE_BACKEND",
                        value: v,
                    })
                }
            };
        }
        if let Some(v) = env_var("CERTVERIFY_ARCHIVE_DIR") {
            self.archive.dir = Some(PathBuf::from(v));
        }
        if let Some(v) = env_var("CERTVERIFY_OCR_COMMAND") {
            self.extractor.command = Some(v);
        }
        if let Some(v) = env_var("CERTVERIFY_OCR_ARGS") {
            self.extractor.args = v.split_whitespace().map(String::from).collect();
        }
        if let Some(v) = env_var("CERTVERIFY_VERIFY_TIMEOUT") {
            self.verify_timeout_secs = parse_env("CERTVERIFY_VERIFY_TIMEOUT", &v)?;
        }

        self.registry = self.registry.with_env()?;
        self.archive.pinata = self.archive.pinata.with_env();
        Ok(self)
    }

    /// Apply command-line overrides.
    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        if let Some(min) = args.min_score {
            self.policy.min_trust_score = min;
        }
        if let Some(backend) = args.registry {
            self.registry.backend = backend.into();
        }
        if let Some(table) = &args.registry_table {
            self.registry.table = Some(table.clone());
        }
        if let Some(backend) = args.archive {
            self.archive.backend = backend.into();
        }
        if let Some(dir) = &args.archive_dir {
            self.archive.dir = Some(dir.clone());
        }
        if let Some(command) = &args.ocr_command {
            self.extractor.command = Some(command.clone());
        }
        self
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}
