//! Terminal verdict of one verification.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Normalized metadata returned for an authenticated certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateMeta {
    pub project_id: String,
    pub project_name: String,
    pub score: u32,
    pub issuer: Option<String>,
    pub issued_to: Option<String>,
    /// Archival content identifier.
    pub cid: String,
}

/// Why a submission was rejected.
///
/// The `Display` form is a stable string that callers may match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    ExtractionFailed,
    ScoreBelowThreshold { threshold: u32 },
    MissingProjectId,
    InvalidProjectId,
    RegistryUnavailable,
    ArchivalFailed,
}

impl RejectionReason {
    /// Short machine code, used for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExtractionFailed => "extraction_failed",
            Self::ScoreBelowThreshold { .. } => "score_below_threshold",
            Self::MissingProjectId => "missing_project_id",
            Self::InvalidProjectId => "invalid_project_id",
            Self::RegistryUnavailable => "registry_unavailable",
            Self::ArchivalFailed => "archival_failed",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtractionFailed => f.write_str("extraction failed"),
            Self::ScoreBelowThreshold { threshold } => write!(f, "score below {}", threshold),
            Self::MissingProjectId => f.write_str("missing project identifier"),
            Self::InvalidProjectId => f.write_str("invalid project identifier"),
            Self::RegistryUnavailable => f.write_str("registry unavailable"),
            Self::ArchivalFailed => f.write_str("archival failed"),
        }
    }
}

impl Serialize for RejectionReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of a verification. Serializes as
/// `{"status": "authenticated", "meta": {...}}` or
/// `{"status": "rejected", "reason": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VerificationVerdict {
    Authenticated { meta: CertificateMeta },
    Rejected { reason: RejectionReason },
}

impl VerificationVerdict {
    pub fn rejected(reason: RejectionReason) -> Self {
        Self::Rejected { reason }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn meta(&self) -> Option<&CertificateMeta> {
        match self {
            Self::Authenticated { meta } => Some(meta),
            Self::Rejected { .. } => None,
        }
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Authenticated { .. } => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reason_strings_are_stable() {
        let cases = [
            (RejectionReason::ExtractionFailed, "extraction failed"),
            (
                RejectionReason::ScoreBelowThreshold { threshold: 70 },
                "score below 70",
            ),
            (
                RejectionReason::MissingProjectId,
                "missing project identifier",
            ),
            (
                RejectionReason::InvalidProjectId,
                "invalid project identifier",
            ),
            (RejectionReason::RegistryUnavailable, "registry unavailable"),
            (RejectionReason::ArchivalFailed, "archival failed"),
        ];
        for (reason, expected) in cases {
            assert_eq!(reason.to_string(), expected);
        }
    }

    #[test]
    fn rejected_verdict_wire_shape() {
        let verdict = VerificationVerdict::rejected(RejectionReason::MissingProjectId);
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(
            value,
            json!({"status": "rejected", "reason": "missing project identifier"})
        );
    }

    #[test]
    fn authenticated_verdict_wire_shape() {
        let verdict = VerificationVerdict::Authenticated {
            meta: CertificateMeta {
                project_id: "VCS-875".to_string(),
                project_name: "Amazon Basin REDD+ Conservation".to_string(),
                score: 85,
                issuer: None,
                issued_to: Some("Green Future Innovations Corp.".to_string()),
                cid: "Qm123".to_string(),
            },
        };
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["status"], "authenticated");
        assert_eq!(value["meta"]["project_id"], "VCS-875");
        assert_eq!(value["meta"]["score"], 85);
        assert_eq!(value["meta"]["issuer"], serde_json::Value::Null);
        assert_eq!(value["meta"]["cid"], "Qm123");
    }
}
