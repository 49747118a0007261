//! Static registry: a fixed identifier → record table.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use certverify_core::{ProjectRecord, ProjectRegistry, RegistryRecord};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};

const BUILTIN_TABLE: &str = include_str!("builtin_projects.yaml");

/// Registry answering from an in-memory table. Never reports a lookup error.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    projects: BTreeMap<String, ProjectRecord>,
}

impl StaticRegistry {
    pub fn new(projects: BTreeMap<String, ProjectRecord>) -> Self {
        Self { projects }
    }

    /// The bundled table of known VCS projects.
    pub fn builtin() -> RegistryResult<Self> {
        Self::from_yaml_str(BUILTIN_TABLE)
    }

    /// Parse a table from YAML (JSON is accepted too, being a YAML subset).
    ///
    /// The document must be a mapping from project identifier to a mapping
    /// of project attributes.
    pub fn from_yaml_str(content: &str) -> RegistryResult<Self> {
        let table: BTreeMap<String, Map<String, Value>> =
            serde_yaml::from_str(content).map_err(|e| RegistryError::Config {
                message: format!("invalid registry table: {}", e),
            })?;

        let projects = table
            .into_iter()
            .map(|(id, fields)| (id.trim().to_string(), ProjectRecord::new(fields)))
            .collect();
        Ok(Self { projects })
    }

    /// Load a table file.
    pub async fn from_file(path: &Path) -> RegistryResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RegistryError::Config {
                message: format!("failed to read registry table {}: {}", path.display(), e),
            })?;
        Self::from_yaml_str(&content)
    }

    pub fn with_project(mut self, id: impl AsRef<str>, record: ProjectRecord) -> Self {
        self.projects.insert(id.as_ref().trim().to_string(), record);
        self
    }

    pub fn get(&self, project_id: &str) -> Option<&ProjectRecord> {
        self.projects.get(project_id.trim())
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }
}

#[async_trait]
impl ProjectRegistry for StaticRegistry {
    async fn lookup(&self, project_id: &str) -> RegistryRecord {
        match self.get(project_id) {
            Some(record) => RegistryRecord::Found(record.clone()),
            None => {
                debug!(project_id, "project not in static table");
                RegistryRecord::NotFound
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "static"
    }
}
