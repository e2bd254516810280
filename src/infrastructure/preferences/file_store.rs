//! JSON-file-backed preference store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::repositories::PreferenceStore;
use crate::error::AppError;

/// Preference store persisted as one JSON object on disk.
///
/// The whole object is kept in memory and rewritten on every `set`, which is
/// fine for the two small entries it holds. Writes go to a sibling temporary
/// file first and are renamed into place.
pub struct FilePreferenceStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FilePreferenceStore {
    /// Opens (or prepares) the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is ignored with a warning and overwritten on the next write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the parent directory cannot be created
    /// or the file exists but cannot be read.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }

        let entries = match fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        "Ignoring unreadable preferences file {}: {}",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Cannot read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        info!("Preferences stored in {}", path.display());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::storage(format!("Cannot encode preferences: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().await;
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated).await?;
        *entries = updated;
        debug!("Preference SET: {} = {}", key, value);
        Ok(())
    }
}
