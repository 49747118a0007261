//! Acceptance policy applied to extracted claims.

use serde::{Deserialize, Serialize};

use crate::claims::ExtractedClaims;
use crate::verdict::RejectionReason;

/// Minimum trust score accepted when no override is configured.
pub const DEFAULT_MIN_TRUST_SCORE: u32 = 70;

/// Policy constants for the claim gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationPolicy {
    /// Scores strictly below this value are rejected.
    #[serde(default = "default_min_trust_score")]
    pub min_trust_score: u32,
}

fn default_min_trust_score() -> u32 {
    DEFAULT_MIN_TRUST_SCORE
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            min_trust_score: DEFAULT_MIN_TRUST_SCORE,
        }
    }
}

impl VerificationPolicy {
    pub fn with_min_trust_score(mut self, min: u32) -> Self {
        self.min_trust_score = min;
        self
    }

    /// Score gate. An absent score never passes.
    pub fn check_score(&self, claims: &ExtractedClaims) -> Result<u32, RejectionReason> {
        match claims.trust_score {
            Some(score) if score >= self.min_trust_score => Ok(score),
            _ => Err(RejectionReason::ScoreBelowThreshold {
                threshold: self.min_trust_score,
            }),
        }
    }

    /// Identifier gate. Blank identifiers count as missing.
    pub fn check_project_id<'a>(
        &self,
        claims: &'a ExtractedClaims,
    ) -> Result<&'a str, RejectionReason> {
        claims
            .project_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(RejectionReason::MissingProjectId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_at_threshold_passes() {
        let policy = VerificationPolicy::default();
        let claims = ExtractedClaims::default().with_trust_score(70);
        assert_eq!(policy.check_score(&claims), Ok(70));
    }

    #[test]
    fn score_below_threshold_is_rejected() {
        let policy = VerificationPolicy::default();
        let claims = ExtractedClaims::default().with_trust_score(69);
        assert_eq!(
            policy.check_score(&claims),
            Err(RejectionReason::ScoreBelowThreshold { threshold: 70 })
        );
    }

    #[test]
    fn absent_score_is_rejected_not_zeroed() {
        let policy = VerificationPolicy::default().with_min_trust_score(0);
        let claims = ExtractedClaims::default();
        assert!(policy.check_score(&claims).is_err());
    }

    #[test]
    fn custom_threshold_is_honoured() {
        let policy = VerificationPolicy::default().with_min_trust_score(90);
        let claims = ExtractedClaims::default().with_trust_score(85);
        let err = policy.check_score(&claims).unwrap_err();
        assert_eq!(err.to_string(), "score below 90");
    }

    #[test]
    fn blank_project_id_is_missing() {
        let policy = VerificationPolicy::default();
        let claims = ExtractedClaims::default().with_project_id("   ");
        assert_eq!(
            policy.check_project_id(&claims),
            Err(RejectionReason::MissingProjectId)
        );
    }

    #[test]
    fn project_id_is_trimmed() {
        let policy = VerificationPolicy::default();
        let claims = ExtractedClaims::default().with_project_id(" VCS-875 ");
        assert_eq!(policy.check_project_id(&claims), Ok("VCS-875"));
    }
}
