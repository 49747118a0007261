//! Filesystem store keyed by SHA-256.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

use super::{ArchivalStore, ArchiveError, ContentId};

const DIGEST_PREFIX: &str = "sha256:";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stores documents under `<root>/sha256/<hex>`; the content id is
/// `sha256:<hex>`.
#[derive(Debug, Clone)]
pub struct LocalContentStore {
    root: PathBuf,
}

impl LocalContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Content id the given bytes would be stored under.
    pub fn content_id_for(document: &[u8]) -> ContentId {
        ContentId(format!("{}{:x}", DIGEST_PREFIX, Sha256::digest(document)))
    }

    /// Path of an archived document.
    pub fn path_for(&self, cid: &ContentId) -> Result<PathBuf, ArchiveError> {
        let hex = cid
            .as_str()
            .strip_prefix(DIGEST_PREFIX)
            .filter(|h| h.len() == 64 && h.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| ArchiveError::NotFound {
                cid: cid.to_string(),
            })?;
        Ok(self.root.join("sha256").join(hex))
    }

    /// Read an archived document back.
    pub async fn retrieve(&self, cid: &ContentId) -> Result<Vec<u8>, ArchiveError> {
        let path = self.path_for(cid)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ArchiveError::NotFound {
                cid: cid.to_string(),
            }),
            Err(e) => Err(ArchiveError::Io {
                message: format!("failed to read {}: {}", path.display(), e),
            }),
        }
    }

    async fn write_atomic(&self, path: &Path, document: &[u8]) -> Result<(), ArchiveError> {
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_path = path.with_extension(format!("{}-{}.tmp", std::process::id(), seq));

        fs::write(&temp_path, document)
            .await
            .map_err(|e| ArchiveError::Io {
                message: format!("failed to write temp file: {}", e),
            })?;

        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(ArchiveError::Io {
                message: format!("failed to rename temp file: {}", e),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl ArchivalStore for LocalContentStore {
    async fn store(&self, document: &[u8]) -> Result<ContentId, ArchiveError> {
        let cid = Self::content_id_for(document);
        let path = self.path_for(&cid)?;

        if fs::try_exists(&path).await.unwrap_or(false) {
            debug!(cid = %cid, "document already archived");
            return Ok(cid);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ArchiveError::Io {
                    message: format!("failed to create archive directory: {}", e),
                })?;
        }

        self.write_atomic(&path, document).await?;
        debug!(cid = %cid, bytes = document.len(), "archived document");
        Ok(cid)
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
