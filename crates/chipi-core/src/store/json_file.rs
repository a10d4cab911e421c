//! JSON document store backed by a single file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::TrainingStore;
use crate::error::{ChipiError, ChipiResult};
use crate::types::TrainingData;

/// Stores training data as one pretty-printed JSON document.
///
/// Saves go through a sibling `.tmp` file that is renamed over the target,
/// so readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the document at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "training_data.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_temp(&self, temp: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(temp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        Ok(())
    }
}

async fn remove_temp(temp: &Path) {
    if let Err(e) = fs::remove_file(temp).await {
        warn!(path = %temp.display(), error = %e, "Failed to remove temp file");
    }
}

#[async_trait]
impl TrainingStore for JsonFileStore {
    async fn load(&self) -> ChipiResult<TrainingData> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No training data file, using default seed");
                return Ok(TrainingData::default_seed());
            }
            Err(e) => return Err(e.into()),
        };

        let data: TrainingData =
            serde_json::from_slice(&bytes).map_err(|source| ChipiError::CorruptData {
                path: self.path.clone(),
                source,
            })?;

        info!(
            path = %self.path.display(),
            categories = data.len(),
            "Loaded training data"
        );
        Ok(data)
    }

    async fn save(&self, data: &TrainingData) -> ChipiResult<()> {
        let bytes = serde_json::to_vec_pretty(data)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                ChipiError::persistence(
                    format!("Failed to create directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let temp = self.temp_path();
        if let Err(e) = self.write_temp(&temp, &bytes).await {
            remove_temp(&temp).await;
            return Err(ChipiError::persistence(
                format!("Failed to write {}", temp.display()),
                e,
            ));
        }

        if let Err(e) = fs::rename(&temp, &self.path).await {
            remove_temp(&temp).await;
            return Err(ChipiError::persistence(
                format!("Failed to replace {}", self.path.display()),
                e,
            ));
        }

        debug!(path = %self.path.display(), bytes = bytes.len(), "Saved training data");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
