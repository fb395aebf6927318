use super::{StarredStorage, StorageError, STARRED_BUCKET};
use crate::model::EntityRef;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// On-disk layout of the starred bucket.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StarredDocument {
    #[serde(rename = "entityRefs", default)]
    entity_refs: Vec<String>,
}

/// Stores the starred set as one JSON document.
///
/// Each save writes a uniquely named temp file next to the target, fsyncs it and
/// renames it over the target. A reader never observes a half-written document,
/// concurrent writers never share a temp file, and `save` returns only once the
/// data is on disk. A missing file loads as the empty set. Entries that do not
/// parse as entity references are dropped on load; the rest are normalized to
/// canonical form.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at `<dir>/starredEntities.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STARRED_BUCKET}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Temp file + fsync + rename, in the target's directory.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl StarredStorage for JsonFileStorage {
    async fn load(&self) -> Result<BTreeSet<String>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No starred file yet");
                return Ok(BTreeSet::new());
            }
            Err(e) => return Err(e.into()),
        };

        let document: StarredDocument = serde_json::from_slice(&bytes)?;
        let mut starred = BTreeSet::new();
        for raw in document.entity_refs {
            match EntityRef::parse(&raw) {
                Ok(entity_ref) => {
                    starred.insert(String::from(entity_ref));
                }
                Err(e) => warn!(
                    path = %self.path.display(),
                    entry = %raw,
                    error = %e,
                    "Dropping invalid entry"
                ),
            }
        }
        Ok(starred)
    }

    async fn save(&self, starred: &BTreeSet<String>) -> Result<(), StorageError> {
        let document = StarredDocument {
            entity_refs: starred.iter().cloned().collect(),
        };
        let bytes = serde_json::to_vec_pretty(&document)?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| StorageError::Unavailable(format!("save task failed: {e}")))??;
        debug!(path = %self.path.display(), size = starred.len(), "Saved starred file");
        Ok(())
    }
}
