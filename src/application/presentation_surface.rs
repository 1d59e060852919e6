// Presentation surface contract and dashboard layout
use crate::domain::chart::{BoundChart, ChartSpec};
use crate::domain::dashboard::{Dashboard, Panel, PanelError};
use crate::domain::dataset::DatasetName;
use crate::domain::table::NormalizedTable;

/// Anything that can draw dashboard panels.
pub trait DashboardSurface {
    fn begin_dashboard(&mut self, _title: &str) {}
    fn end_dashboard(&mut self) {}

    fn begin_row(&mut self, _row: usize) {}
    fn end_row(&mut self) {}

    fn begin_panel(&mut self, dataset: DatasetName);
    fn end_panel(&mut self) {}

    fn render_chart(&mut self, chart: &BoundChart);
    fn render_table(&mut self, table: &NormalizedTable);
    fn render_empty_placeholder(&mut self, dataset: DatasetName);
    fn render_error(&mut self, error: &PanelError);
}

/// Draw the panels row by row in display order.
pub fn render_dashboard<S: DashboardSurface + ?Sized>(surface: &mut S, dashboard: &Dashboard) {
    surface.begin_dashboard(&dashboard.title);
    for (idx, row) in dashboard.rows().enumerate() {
        surface.begin_row(idx);
        for panel in row {
            render_panel(surface, panel);
        }
        surface.end_row();
    }
    surface.end_dashboard();
}

pub fn render_panel<S: DashboardSurface + ?Sized>(surface: &mut S, panel: &Panel) {
    surface.begin_panel(panel.dataset);
    match &panel.chart {
        Ok(ChartSpec::Chart(chart)) => {
            surface.render_chart(chart);
            surface.render_table(&panel.table);
        }
        Ok(ChartSpec::Empty { dataset }) => surface.render_empty_placeholder(*dataset),
        Err(err @ PanelError::Binding(_)) => {
            surface.render_error(err);
            surface.render_table(&panel.table);
        }
        Err(err @ PanelError::Fetch { .. }) => surface.render_error(err),
    }
    surface.end_panel();
}
