//! Label parsing over recognized certificate text.
//!
//! Score canonicalization: the token after a `Score` label is read, a `/100`
//! denominator and a trailing `%` are dropped, and the remainder must parse as
//! an unsigned integer. The first label whose token canonicalizes wins; when
//! none does the score is absent.
//!
//! Project identifiers come from an explicit `Project ID` / `Project No.`
//! label first, then a bare `Project:` label whose value contains a digit,
//! then the first registry-shaped token anywhere in the text.

use std::sync::OnceLock;

use regex::Regex;

use crate::claims::ExtractedClaims;

fn subject_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*(?:name|issued[ \t]+to|holder)[ \t]*[:\-][ \t]*(.*)$")
            .expect("subject pattern is valid")
    })
}

fn issuer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*(?:issuer|issued[ \t]+by)[ \t]*[:\-][ \t]*(.*)$")
            .expect("issuer pattern is valid")
    })
}

fn score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*(?:[a-z]+[ \t]+)?score[ \t]*[:\-]?[ \t]*(\S*)")
            .expect("score pattern is valid")
    })
}

fn project_id_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?im)^[ \t]*project[ \t]*(?:id|identifier|no\.?|number)[ \t]*[:\-][ \t]*([A-Za-z0-9][A-Za-z0-9._\-]*)",
        )
        .expect("project id label pattern is valid")
    })
}

fn project_bare_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*project[ \t]*[:\-][ \t]*([A-Za-z0-9][A-Za-z0-9._\-]*)")
            .expect("project label pattern is valid")
    })
}

fn project_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:VCS|GS|GCC|CAR|ACR|CDM|PURO)-\d{1,7}\b")
            .expect("project token pattern is valid")
    })
}

/// Parse certificate claims out of recognized text. Never fails; fields that
/// cannot be found are left absent.
pub fn parse_claims(text: &str) -> ExtractedClaims {
    ExtractedClaims {
        subject_name: labelled_value(subject_re(), text),
        trust_score: score_re()
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .find_map(|m| canonical_score(m.as_str())),
        issuer: labelled_value(issuer_re(), text),
        project_id: project_id(text),
        raw_text: text.to_string(),
    }
}

fn labelled_value(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn canonical_score(token: &str) -> Option<u32> {
    let token = token.split('/').next().unwrap_or(token);
    let token = token.strip_suffix('%').unwrap_or(token);
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn project_id(text: &str) -> Option<String> {
    let explicit = project_id_label_re()
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| clean_id(m.as_str()))
        .find(|id| !id.is_empty());

    // A bare `Project:` line often carries the project name instead.
    let bare = || {
        project_bare_label_re()
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| clean_id(m.as_str()))
            .find(|id| id.bytes().any(|b| b.is_ascii_digit()))
    };

    explicit
        .or_else(bare)
        .or_else(|| project_token_re().find(text).map(|m| clean_id(m.as_str())))
        .filter(|id| !id.is_empty())
}

fn clean_id(raw: &str) -> String {
    raw.trim_end_matches(['.', '-']).to_string()
}
