use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use grocer_shared::Pantry;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum PantryStoreError {
    #[error("pantry file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pantry file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the household pantry lives between turns. The stored copy is the
/// source of truth; sessions only cache it.
#[async_trait]
pub trait PantryStore: Send + Sync {
    async fn load(&self) -> Result<Pantry, PantryStoreError>;

    async fn save(&self, pantry: &Pantry) -> Result<(), PantryStoreError>;
}

/// Pantry kept as a pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFilePantryStore {
    path: PathBuf,
}

impl JsonFilePantryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pantry.json".to_owned());

        self.path
            .with_file_name(format!(".{name}.{}.tmp", ulid::Ulid::new()))
    }
}

#[async_trait]
impl PantryStore for JsonFilePantryStore {
    async fn load(&self) -> Result<Pantry, PantryStoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Pantry::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, pantry: &Pantry) -> Result<(), PantryStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(pantry)?;

        // Readers must never see a truncated file, so write a sibling and
        // rename it over the target.
        let tmp = self.tmp_path();
        if let Err(err) = tokio::fs::write(&tmp, content).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }

        tracing::debug!(path = %self.path.display(), items = pantry.len(), "pantry saved");

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPantryStore {
    pantry: Mutex<Pantry>,
}

impl MemoryPantryStore {
    pub fn new(pantry: Pantry) -> Self {
        Self {
            pantry: Mutex::new(pantry),
        }
    }
}

#[async_trait]
impl PantryStore for MemoryPantryStore {
    async fn load(&self) -> Result<Pantry, PantryStoreError> {
        Ok(self.pantry.lock().await.clone())
    }

    async fn save(&self, pantry: &Pantry) -> Result<(), PantryStoreError> {
        *self.pantry.lock().await = pantry.clone();
        Ok(())
    }
}
