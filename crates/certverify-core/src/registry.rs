//! Project registry capability.
//!
//! Backends live in `certverify-registry`; the pipeline only sees this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display name used when the registry record carries no `name` field.
pub const MISSING_PROJECT_NAME: &str = "N/A";

/// Attributes the registry holds for a project (name, category, vintage, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRecord {
    pub fields: Map<String, Value>,
}

impl ProjectRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from a JSON value; `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The project's display name, or [`MISSING_PROJECT_NAME`].
    pub fn display_name(&self) -> &str {
        self.fields
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(MISSING_PROJECT_NAME)
    }
}

/// Result of a registry lookup. Exactly one outcome per lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryRecord {
    Found(ProjectRecord),
    NotFound,
    /// Transient or unexpected failure; the detail is for logs only.
    LookupError(String),
}

/// Resolves project identifiers against an external registry.
///
/// Implementations must keep "not found" and "lookup failed" apart and must
/// not retry on their own.
#[async_trait]
pub trait ProjectRegistry: Send + Sync {
    async fn lookup(&self, project_id: &str) -> RegistryRecord;

    fn backend_name(&self) -> &'static str {
        "registry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_name_reads_name_field() {
        let record =
            ProjectRecord::from_value(json!({"name": "Borneo Peatland Restoration"})).unwrap();
        assert_eq!(record.display_name(), "Borneo Peatland Restoration");
    }

    #[test]
    fn display_name_defaults_when_absent_or_not_a_string() {
        let absent = ProjectRecord::from_value(json!({"country": "Peru"})).unwrap();
        assert_eq!(absent.display_name(), MISSING_PROJECT_NAME);

        let numeric = ProjectRecord::from_value(json!({"name": 42})).unwrap();
        assert_eq!(numeric.display_name(), MISSING_PROJECT_NAME);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(ProjectRecord::from_value(json!(["VCS-875"])).is_none());
        assert!(ProjectRecord::from_value(json!(null)).is_none());
    }
}
