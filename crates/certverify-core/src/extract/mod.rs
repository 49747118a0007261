//! Metadata extraction: recognizer text → [`ExtractedClaims`].
//!
//! The OCR engine is external. A [`TextRecognizer`] turns document bytes into
//! text, and [`ClaimsExtractor`] parses the labelled certificate fields out of
//! that text.

use async_trait::async_trait;
use tracing::debug;

use crate::claims::ExtractedClaims;

mod parse;
mod recognizer;

pub use parse::parse_claims;
pub use recognizer::{CommandRecognizer, TextRecognizer, Utf8TextRecognizer};

/// Extraction failures. Each one is terminal for the submission.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The submission contained no bytes.
    #[error("empty document")]
    EmptyDocument,

    /// Recognition succeeded but produced no usable text.
    #[error("no text recognized")]
    NoText,

    /// Document bytes are not valid text for a text-only recognizer.
    #[error("invalid text encoding: {message}")]
    InvalidEncoding { message: String },

    /// The recognizer could not process the document.
    #[error("recognizer failed: {message}")]
    Recognizer { message: String },

    /// The recognizer did not finish in time.
    #[error("recognizer timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Converts a raw document into claims.
///
/// Malformed input must yield an error, never a silently partial record.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, document: &[u8]) -> Result<ExtractedClaims, ExtractionError>;
}

/// Extractor that recognizes text and parses certificate labels from it.
#[derive(Debug, Clone)]
pub struct ClaimsExtractor<R> {
    recognizer: R,
}

impl<R: TextRecognizer> ClaimsExtractor<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }
}

#[async_trait]
impl<R: TextRecognizer> MetadataExtractor for ClaimsExtractor<R> {
    async fn extract(&self, document: &[u8]) -> Result<ExtractedClaims, ExtractionError> {
        if document.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let text = self.recognizer.recognize(document).await?;
        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        let claims = parse_claims(&text);
        debug!(
            recognizer = self.recognizer.name(),
            text_len = text.len(),
            has_score = claims.trust_score.is_some(),
            has_project_id = claims.project_id.is_some(),
            "parsed certificate claims"
        );
        Ok(claims)
    }
}
