/// Whether `id` is safe to send to a registry: non-empty, at most 64
/// characters, ASCII alphanumerics plus `.`, `_` and `-`.
pub fn is_valid_project_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        && id.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_registry_identifiers() {
        assert!(is_valid_project_id("VCS-875"));
        assert!(is_valid_project_id("GS-1234"));
        assert!(is_valid_project_id("puro.earth_01"));
    }

    #[test]
    fn rejects_path_like_or_blank_identifiers() {
        assert!(!is_valid_project_id(""));
        assert!(!is_valid_project_id("../admin"));
        assert!(!is_valid_project_id("VCS-875/versions"));
        assert!(!is_valid_project_id("VCS 875"));
        assert!(!is_valid_project_id("-VCS"));
        assert!(!is_valid_project_id(&"A".repeat(65)));
    }
}
