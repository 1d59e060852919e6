// Repository trait for aggregate dataset access
use crate::domain::dataset::{DatasetName, Record};
use async_trait::async_trait;

/// Field the document database uses for its own record identifier.
pub const INTERNAL_ID_FIELD: &str = "_id";

#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Fetch every record of a dataset in source order, without the internal id field.
    async fn fetch(&self, dataset: DatasetName) -> anyhow::Result<Vec<Record>>;
}

/// Drop the internal identifier from records that still carry it.
pub fn strip_internal_id(records: &mut [Record]) {
    for record in records {
        record.shift_remove(INTERNAL_ID_FIELD);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_internal_id_keeps_order() {
        let mut records = vec![
            json!({"_id": "65f0", "CustomerName": "Alice", "TotalSpent": 10})
                .as_object()
                .cloned()
                .unwrap(),
        ];

        strip_internal_id(&mut records);

        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, vec!["CustomerName", "TotalSpent"]);
    }
}
