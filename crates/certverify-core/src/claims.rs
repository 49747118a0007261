//! Claims extracted from a certificate document.

use serde::{Deserialize, Serialize};

/// Best-effort structured record produced by a [`crate::MetadataExtractor`].
///
/// Every claim is optional: a field the extractor could not find is `None`,
/// never a default such as `0` or `"Unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedClaims {
    /// Holder the certificate was issued to.
    #[serde(default)]
    pub subject_name: Option<String>,

    /// Trust score printed on the certificate.
    #[serde(default)]
    pub trust_score: Option<u32>,

    /// Issuing organisation.
    #[serde(default)]
    pub issuer: Option<String>,

    /// Registry project identifier (e.g. `VCS-875`).
    #[serde(default)]
    pub project_id: Option<String>,

    /// Full recognized text, kept for audit.
    #[serde(default)]
    pub raw_text: String,
}

impl ExtractedClaims {
    /// Claims with only the raw text set.
    pub fn from_raw_text(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    pub fn with_subject_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = Some(name.into());
        self
    }

    pub fn with_trust_score(mut self, score: u32) -> Self {
        self.trust_score = Some(score);
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}
