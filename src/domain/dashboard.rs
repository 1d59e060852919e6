// Dashboard domain model
use super::chart::{BindingError, ChartSpec};
use super::dataset::DatasetName;
use super::table::NormalizedTable;

/// Panels per dashboard row.
pub const PANELS_PER_ROW: usize = 2;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PanelError {
    #[error("failed to fetch {dataset}: {message}")]
    Fetch {
        dataset: DatasetName,
        message: String,
    },
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// One dataset's slot on the page: its table and either a chart spec or the reason it has none.
#[derive(Debug, Clone)]
pub struct Panel {
    pub dataset: DatasetName,
    pub table: NormalizedTable,
    pub chart: Result<ChartSpec, PanelError>,
}

impl Panel {
    pub fn new(dataset: DatasetName, table: NormalizedTable, chart: Result<ChartSpec, PanelError>) -> Self {
        Self {
            dataset,
            table,
            chart,
        }
    }

    pub fn title(&self) -> &'static str {
        self.dataset.title()
    }

    /// (row, column) of the panel in the grid.
    pub fn grid_position(&self) -> (usize, usize) {
        grid_position(self.dataset)
    }
}

pub fn grid_position(dataset: DatasetName) -> (usize, usize) {
    let pos = dataset.position();
    (pos / PANELS_PER_ROW, pos % PANELS_PER_ROW)
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub panels: Vec<Panel>,
}

impl Dashboard {
    /// Panels are kept in display order regardless of the order they were produced in.
    pub fn new(title: String, mut panels: Vec<Panel>) -> Self {
        panels.sort_by_key(|p| p.dataset.position());
        Self { title, panels }
    }

    /// Panels grouped into grid rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Panel]> {
        self.panels.chunks(PANELS_PER_ROW)
    }

    #[cfg(test)]
    pub fn panel(&self, dataset: DatasetName) -> Option<&Panel> {
        self.panels.iter().find(|p| p.dataset == dataset)
    }
}
