//! Builds pipeline collaborators from the resolved configuration.
//!
//! Backend selection happens here, once, so the pipeline itself never looks at
//! configuration or the environment.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use certverify_core::archive::{LocalContentStore, PinataStore};
use certverify_core::extract::{ClaimsExtractor, CommandRecognizer, Utf8TextRecognizer};
use certverify_core::{ArchivalStore, MetadataExtractor, ProjectRegistry, VerificationPipeline};
use certverify_registry::{HttpRegistry, RegistryBackend, RegistryConfig, StaticRegistry};
use tracing::debug;

use crate::config::{ArchiveBackend, ArchiveSettings, ExtractorSettings, VerifierConfig};

pub async fn build_pipeline(config: &VerifierConfig) -> anyhow::Result<VerificationPipeline> {
    let extractor = build_extractor(&config.extractor);
    let archive = build_archive(&config.archive)?;
    let registry = build_registry(&config.registry).await?;
    debug!(
        registry = registry.backend_name(),
        archive = archive.backend_name(),
        min_trust_score = config.policy.min_trust_score,
        "pipeline configured"
    );
    Ok(VerificationPipeline::new(
        extractor,
        registry,
        archive,
        config.policy,
    ))
}

pub fn build_extractor(settings: &ExtractorSettings) -> Arc<dyn MetadataExtractor> {
    match &settings.command {
        Some(program) => Arc::new(ClaimsExtractor::new(
            CommandRecognizer::new(program.clone())
                .with_args(settings.args.iter().cloned())
                .with_timeout(Duration::from_secs(settings.timeout_secs)),
        )),
        None => Arc::new(ClaimsExtractor::new(Utf8TextRecognizer)),
    }
}

pub async fn build_registry(config: &RegistryConfig) -> anyhow::Result<Arc<dyn ProjectRegistry>> {
    match config.backend {
        RegistryBackend::Static => {
            let registry = match &config.table {
                Some(path) => StaticRegistry::from_file(path).await?,
                None => StaticRegistry::builtin()?,
            };
            Ok(Arc::new(registry))
        }
        RegistryBackend::Http => Ok(Arc::new(HttpRegistry::new(config.clone())?)),
    }
}

pub fn build_archive(settings: &ArchiveSettings) -> anyhow::Result<Arc<dyn ArchivalStore>> {
    match settings.backend {
        ArchiveBackend::Local => {
            let dir = match &settings.dir {
                Some(dir) => dir.clone(),
                None => default_archive_dir()?,
            };
            Ok(Arc::new(LocalContentStore::new(dir)))
        }
        ArchiveBackend::Pinata => Ok(Arc::new(
            PinataStore::new(settings.pinata.clone()).context("pinata archive unavailable")?,
        )),
    }
}

fn default_archive_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .context("could not determine archive directory; set CERTVERIFY_ARCHIVE_DIR")?;
    Ok(base.join("certverify").join("archive"))
}
