// Streaming dashboard service - Progressive loading, one panel per message
use crate::application::dashboard_service::build_panel;
use crate::application::dataset_repository::DatasetRepository;
use crate::domain::dashboard::{Panel, grid_position};
use crate::domain::dataset::DatasetName;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 16;

/// Placeholder announced before any data is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSlot {
    pub dataset: DatasetName,
    pub title: &'static str,
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone)]
pub enum StreamMessage {
    Skeleton { title: String, slots: Vec<PanelSlot> },
    Panel(Panel),
    Complete { panels: usize, duration_ms: i64 },
}

#[derive(Clone)]
pub struct StreamingDashboardService {
    repository: Arc<dyn DatasetRepository>,
    title: String,
}

impl StreamingDashboardService {
    pub fn new(repository: Arc<dyn DatasetRepository>, title: String) -> Self {
        Self { repository, title }
    }

    /// Send the skeleton, then each panel as soon as it is ready, then a completion event.
    pub fn stream_dashboard(&self) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let start_time = Instant::now();
        let skeleton = StreamMessage::Skeleton {
            title: self.title.clone(),
            slots: build_skeleton(),
        };
        let repository = self.repository.clone();

        tokio::spawn(async move {
            if tx.send(skeleton).await.is_err() {
                return;
            }

            let handles: Vec<_> = DatasetName::ALL
                .into_iter()
                .map(|dataset| {
                    let tx = tx.clone();
                    let repo = repository.clone();
                    tokio::spawn(async move {
                        let panel = build_panel(repo.as_ref(), dataset).await;
                        let _ = tx.send(StreamMessage::Panel(panel)).await;
                    })
                })
                .collect();

            let mut panels = 0;
            for handle in handles {
                match handle.await {
                    Ok(()) => panels += 1,
                    Err(e) => tracing::error!("Panel task failed: {}", e),
                }
            }

            let duration_ms = start_time.elapsed().as_millis() as i64;
            tracing::debug!("Streamed {} panels in {}ms", panels, duration_ms);
            let _ = tx
                .send(StreamMessage::Complete {
                    panels,
                    duration_ms,
                })
                .await;
        });

        rx
    }
}

fn build_skeleton() -> Vec<PanelSlot> {
    DatasetName::ALL
        .into_iter()
        .map(|dataset| {
            let (row, column) = grid_position(dataset);
            PanelSlot {
                dataset,
                title: dataset.title(),
                row,
                column,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dataset_repository::testing::full_repository;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_stream_sends_skeleton_panels_and_completion() {
        let service = StreamingDashboardService::new(Arc::new(full_repository()), "Retail".to_string());
        let mut rx = service.stream_dashboard();

        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }

        assert_eq!(messages.len(), 8);
        match &messages[0] {
            StreamMessage::Skeleton { title, slots } => {
                assert_eq!(title, "Retail");
                assert_eq!(slots.len(), 6);
                assert_eq!((slots[5].row, slots[5].column), (2, 1));
            }
            other => panic!("expected skeleton, got {:?}", other),
        }

        let streamed: HashSet<DatasetName> = messages[1..7]
            .iter()
            .map(|m| match m {
                StreamMessage::Panel(panel) => panel.dataset,
                other => panic!("expected panel, got {:?}", other),
            })
            .collect();
        assert_eq!(streamed.len(), 6);

        assert!(matches!(messages[7], StreamMessage::Complete { panels: 6, .. }));
    }
}
