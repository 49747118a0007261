//! The verification pipeline.
//!
//! Stages run strictly in order and stop at the first rejection:
//!
//! 1. extract claims
//! 2. score gate
//! 3. project identifier gate
//! 4. registry gate
//! 5. archival
//! 6. verdict assembly
//!
//! Registry lookup never runs before the claim gates pass, and archival never
//! runs before the registry confirms the project, so rejected documents are
//! never stored. Every collaborator failure becomes a rejection; nothing is
//! retried.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::archive::ArchivalStore;
use crate::claims::ExtractedClaims;
use crate::extract::MetadataExtractor;
use crate::policy::VerificationPolicy;
use crate::registry::{ProjectRecord, ProjectRegistry, RegistryRecord};
use crate::verdict::{CertificateMeta, RejectionReason, VerificationVerdict};

/// Orchestrates extraction, policy gates, registry validation and archival.
///
/// Holds only shared, immutable handles; concurrent `verify` calls do not
/// interact.
#[derive(Clone)]
pub struct VerificationPipeline {
    extractor: Arc<dyn MetadataExtractor>,
    registry: Arc<dyn ProjectRegistry>,
    archive: Arc<dyn ArchivalStore>,
    policy: VerificationPolicy,
}

impl std::fmt::Debug for VerificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationPipeline")
            .field("registry", &self.registry.backend_name())
            .field("archive", &self.archive.backend_name())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl VerificationPipeline {
    pub fn new(
        extractor: Arc<dyn MetadataExtractor>,
        registry: Arc<dyn ProjectRegistry>,
        archive: Arc<dyn ArchivalStore>,
        policy: VerificationPolicy,
    ) -> Self {
        Self {
            extractor,
            registry,
            archive,
            policy,
        }
    }

    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    /// Verify one submission. Always returns a verdict.
    pub async fn verify(&self, document: &[u8]) -> VerificationVerdict {
        match self.run(document).await {
            Ok(meta) => {
                info!(
                    project_id = %meta.project_id,
                    score = meta.score,
                    cid = %meta.cid,
                    "certificate authenticated"
                );
                VerificationVerdict::Authenticated { meta }
            }
            Err(reason) => {
                info!(code = reason.code(), reason = %reason, "certificate rejected");
                VerificationVerdict::rejected(reason)
            }
        }
    }

    async fn run(&self, document: &[u8]) -> Result<CertificateMeta, RejectionReason> {
        debug!(bytes = document.len(), "extracting certificate claims");
        let claims = self.extractor.extract(document).await.map_err(|e| {
            warn!(error = %e, "claim extraction failed");
            RejectionReason::ExtractionFailed
        })?;

        let score = self.policy.check_score(&claims)?;
        let project_id = self.policy.check_project_id(&claims)?;

        let record = self.validate_project(project_id).await?;

        let cid = self.archive.store(document).await.map_err(|e| {
            warn!(
                backend = self.archive.backend_name(),
                error = %e,
                "archival failed"
            );
            RejectionReason::ArchivalFailed
        })?;

        Ok(assemble_meta(
            &claims,
            project_id,
            score,
            &record,
            cid.into_string(),
        ))
    }

    async fn validate_project(&self, project_id: &str) -> Result<ProjectRecord, RejectionReason> {
        debug!(
            project_id,
            backend = self.registry.backend_name(),
            "validating project identifier"
        );
        match self.registry.lookup(project_id).await {
            RegistryRecord::Found(record) => Ok(record),
            RegistryRecord::NotFound => Err(RejectionReason::InvalidProjectId),
            RegistryRecord::LookupError(detail) => {
                warn!(project_id, detail = %detail, "registry lookup failed");
                Err(RejectionReason::RegistryUnavailable)
            }
        }
    }
}

fn assemble_meta(
    claims: &ExtractedClaims,
    project_id: &str,
    score: u32,
    record: &ProjectRecord,
    cid: String,
) -> CertificateMeta {
    CertificateMeta {
        project_id: project_id.to_string(),
        project_name: record.display_name().to_string(),
        score,
        issuer: claims.issuer.clone(),
        issued_to: claims.subject_name.clone(),
        cid,
    }
}
