// Dashboard service - Fetch, normalize and bind every dataset
use crate::application::chart_binding::resolve;
use crate::application::dataset_repository::DatasetRepository;
use crate::application::normalizer::normalize;
use crate::domain::dashboard::{Dashboard, Panel, PanelError};
use crate::domain::dataset::DatasetName;
use crate::domain::table::NormalizedTable;
use futures::future::join_all;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn DatasetRepository>,
    title: String,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DatasetRepository>, title: String) -> Self {
        Self { repository, title }
    }

    /// Build all six panels. A failing dataset only affects its own panel.
    pub async fn get_dashboard(&self) -> Dashboard {
        let panels = join_all(DatasetName::ALL.into_iter().map(|d| self.get_panel(d))).await;
        Dashboard::new(self.title.clone(), panels)
    }

    pub async fn get_panel(&self, dataset: DatasetName) -> Panel {
        build_panel(self.repository.as_ref(), dataset).await
    }
}

/// fetch -> normalize -> resolve for a single dataset.
pub async fn build_panel(repository: &dyn DatasetRepository, dataset: DatasetName) -> Panel {
    let records = match repository.fetch(dataset).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Error fetching dataset {}: {:#}", dataset, e);
            let error = PanelError::Fetch {
                dataset,
                message: format!("{:#}", e),
            };
            return Panel::new(dataset, NormalizedTable::empty(dataset), Err(error));
        }
    };

    tracing::debug!("Fetched {} records for {}", records.len(), dataset);

    let table = normalize(dataset, &records);
    let chart = resolve(dataset, &table).map_err(|e| {
        tracing::error!("Chart binding failed: {}", e);
        PanelError::from(e)
    });

    Panel::new(dataset, table, chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dataset_repository::testing::{InMemoryRepository, full_repository};
    use crate::domain::chart::{BindingError, ChartKind, ChartSpec};
    use serde_json::json;

    fn service(repository: InMemoryRepository) -> DashboardService {
        DashboardService::new(Arc::new(repository), "Retail Sales Dashboard".to_string())
    }

    #[tokio::test]
    async fn test_full_dashboard() {
        let dashboard = service(full_repository()).get_dashboard().await;

        assert_eq!(dashboard.title, "Retail Sales Dashboard");
        assert_eq!(dashboard.panels.len(), 6);
        let kinds: Vec<ChartKind> = dashboard
            .panels
            .iter()
            .map(|p| match &p.chart {
                Ok(ChartSpec::Chart(chart)) => chart.kind,
                other => panic!("{} did not resolve: {:?}", p.dataset, other),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::HorizontalBar,
                ChartKind::VerticalBar,
                ChartKind::VerticalBar,
                ChartKind::Line,
                ChartKind::Line,
                ChartKind::Scatter,
            ]
        );
    }

    #[tokio::test]
    async fn test_binding_error_is_isolated() {
        let repository = full_repository().with(
            DatasetName::BranchRevenueComparison,
            vec![json!({"Branch": "North", "TotalRevenue": 10})],
        );

        let dashboard = service(repository).get_dashboard().await;

        let broken = dashboard.panel(DatasetName::BranchRevenueComparison).unwrap();
        assert!(matches!(
            &broken.chart,
            Err(PanelError::Binding(BindingError::MissingColumn { column, .. })) if column == "BranchName"
        ));
        assert_eq!(broken.table.row_count(), 1);

        let resolved = dashboard
            .panels
            .iter()
            .filter(|p| matches!(p.chart, Ok(ChartSpec::Chart(_))))
            .count();
        assert_eq!(resolved, 5);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_isolated() {
        let repository = full_repository().failing(DatasetName::TopCustomers);

        let dashboard = service(repository).get_dashboard().await;

        let failed = dashboard.panel(DatasetName::TopCustomers).unwrap();
        assert!(matches!(failed.chart, Err(PanelError::Fetch { .. })));
        assert!(failed.table.is_empty());
        assert!(dashboard.panel(DatasetName::StockPlanning).unwrap().chart.is_ok());
    }

    #[tokio::test]
    async fn test_missing_dataset_renders_empty() {
        let dashboard = service(InMemoryRepository::default()).get_dashboard().await;

        for panel in &dashboard.panels {
            assert_eq!(panel.chart, Ok(ChartSpec::Empty { dataset: panel.dataset }));
        }
    }
}
