//! Carbon-offset certificate verification.
//!
//! This crate turns an uploaded certificate document into a terminal verdict:
//!
//! - Claim extraction from OCR / text output ([`extract`])
//! - Trust-score and project-identifier policy gates ([`policy`])
//! - Registry cross-validation through the [`ProjectRegistry`] capability
//! - Content-addressed archival of accepted documents ([`archive`])
//! - Verdict assembly ([`verdict`])
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use certverify_core::archive::LocalContentStore;
//! use certverify_core::extract::{ClaimsExtractor, Utf8TextRecognizer};
//! use certverify_core::{RegistryRecord, ProjectRegistry, VerificationPipeline, VerificationPolicy};
//!
//! struct AlwaysMissing;
//!
//! #[async_trait::async_trait]
//! impl ProjectRegistry for AlwaysMissing {
//!     async fn lookup(&self, _project_id: &str) -> RegistryRecord {
//!         RegistryRecord::NotFound
//!     }
//! }
//!
//! # async fn example() {
//! let pipeline = VerificationPipeline::new(
//!     Arc::new(ClaimsExtractor::new(Utf8TextRecognizer)),
//!     Arc::new(AlwaysMissing),
//!     Arc::new(LocalContentStore::new("/var/lib/certverify")),
//!     VerificationPolicy::default(),
//! );
//!
//! let verdict = pipeline.verify(b"Score: 85\nProject ID: VCS-875\n").await;
//! println!("{}", serde_json::to_string(&verdict).unwrap());
//! # }
//! ```

pub mod archive;
pub mod claims;
pub mod extract;
pub mod pipeline;
pub mod policy;
pub mod registry;
pub mod verdict;

pub use archive::{ArchivalStore, ArchiveError, ContentId};
pub use claims::ExtractedClaims;
pub use extract::{ExtractionError, MetadataExtractor};
pub use pipeline::VerificationPipeline;
pub use policy::{VerificationPolicy, DEFAULT_MIN_TRUST_SCORE};
pub use registry::{ProjectRecord, ProjectRegistry, RegistryRecord, MISSING_PROJECT_NAME};
pub use verdict::{CertificateMeta, RejectionReason, VerificationVerdict};
