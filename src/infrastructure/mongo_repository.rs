// Document database repository over the MongoDB driver
use crate::application::dataset_repository::{DatasetRepository, strip_internal_id};
use crate::domain::dataset::{DatasetName, Record};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Database};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct MongoRepository {
    database: Database,
}

impl MongoRepository {
    /// Parse the connection string and select the database. The driver connects lazily.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Invalid MongoDB connection string")?;
        Ok(Self {
            database: client.database(database),
        })
    }
}

fn find_filter() -> Document {
    doc! {}
}

fn find_projection() -> Document {
    doc! { "_id": 0 }
}

/// Relaxed extended JSON keeps plain numbers plain and wraps dates as `{"$date": ...}`.
fn document_to_record(document: Document) -> Record {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(record) => record,
        _ => Record::new(),
    }
}

#[async_trait]
impl DatasetRepository for MongoRepository {
    async fn fetch(&self, dataset: DatasetName) -> Result<Vec<Record>> {
        let cursor = self
            .database
            .collection::<Document>(dataset.as_str())
            .find(find_filter())
            .projection(find_projection())
            .await
            .with_context(|| format!("Failed to query collection {}", dataset))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .with_context(|| format!("Failed to read documents from {}", dataset))?;

        let mut records: Vec<Record> = documents.into_iter().map(document_to_record).collect();
        strip_internal_id(&mut records);
        Ok(records)
    }
}
