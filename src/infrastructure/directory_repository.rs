// Directory repository - Reads exported collections from JSON files
use crate::application::dataset_repository::{DatasetRepository, strip_internal_id};
use crate::domain::dataset::{DatasetName, Record};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Expects one `<Dataset>.json` file per collection holding an array of documents.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    root: PathBuf,
}

impl DirectoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn dataset_path(&self, dataset: DatasetName) -> PathBuf {
        self.root.join(format!("{}.json", dataset.as_str()))
    }
}

#[async_trait]
impl DatasetRepository for DirectoryRepository {
    async fn fetch(&self, dataset: DatasetName) -> Result<Vec<Record>> {
        let path = self.dataset_path(dataset);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No export for {} at {}", dataset, path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let mut records: Vec<Record> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        strip_internal_id(&mut records);

        Ok(records)
    }
}
