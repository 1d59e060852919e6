// HTML dashboard page rendered through the DashboardSurface contract
use crate::application::presentation_surface::{DashboardSurface, render_dashboard};
use crate::domain::chart::BoundChart;
use crate::domain::dashboard::{Dashboard, PanelError};
use crate::domain::dataset::DatasetName;
use crate::domain::table::NormalizedTable;
use crate::infrastructure::figure_mapper::chart_to_figure;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const TABLE_HEIGHT_PX: u32 = 300;

const STYLE: &str = r#"
body { background-color: #1e1e2f; color: #f0f0f0; font-family: sans-serif; margin: 0 2rem 2rem; }
h1, h3 { color: #ffcc00; font-weight: bold; }
.row { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; margin-bottom: 2rem; }
.panel { min-width: 0; }
.table-wrap { overflow: auto; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th { background-color: #44475a; color: #ffffff; position: sticky; top: 0; }
td { background-color: #2b2b3c; color: #ffffff; }
th, td { padding: 4px 8px; text-align: left; border-bottom: 1px solid #1e1e2f; }
.warning { background-color: #5c4b1b; color: #ffe08a; padding: 1rem; border-radius: 4px; }
.error { background-color: #5c1b1b; color: #ffb3b3; padding: 1rem; border-radius: 4px; }
.success { background-color: #1b5c2e; color: #b3ffc6; padding: 1rem; border-radius: 4px; }
"#;

const RENDER_SCRIPT: &str = r#"
document.querySelectorAll('script[data-figure]').forEach(function (el) {
  var figure = JSON.parse(el.textContent);
  Plotly.newPlot(el.dataset.figure, figure.data, figure.layout, {responsive: true});
});
"#;

/// JSON text that cannot close the surrounding script element.
fn script_safe_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn chart_element_id(dataset: DatasetName) -> String {
    format!("chart-{}", dataset.as_str())
}

#[derive(Debug, Default)]
pub struct HtmlSurface {
    html: String,
}

impl HtmlSurface {
    pub fn into_html(self) -> String {
        self.html
    }
}

// Writing into a String cannot fail, so the fmt::Results below are ignored.
impl DashboardSurface for HtmlSurface {
    fn begin_dashboard(&mut self, title: &str) {
        let title = encode_text(title);
        let _ = write!(
            self.html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>{STYLE}</style>\n\
             <script src=\"{PLOTLY_CDN}\"></script>\n</head>\n<body>\n<h1>📊 {title}</h1>\n"
        );
    }

    fn end_dashboard(&mut self) {
        let _ = write!(
            self.html,
            "<div class=\"success\">✅ Dashboard loaded successfully</div>\n\
             <script>{RENDER_SCRIPT}</script>\n</body>\n</html>\n"
        );
    }

    fn begin_row(&mut self, row: usize) {
        let _ = writeln!(self.html, "<div class=\"row\" data-row=\"{}\">", row);
    }

    fn end_row(&mut self) {
        self.html.push_str("</div>\n");
    }

    fn begin_panel(&mut self, dataset: DatasetName) {
        let _ = write!(
            self.html,
            "<section class=\"panel\" id=\"panel-{}\">\n<h3>{} {}</h3>\n",
            dataset.as_str(),
            dataset.icon(),
            encode_text(dataset.title())
        );
    }

    fn end_panel(&mut self) {
        self.html.push_str("</section>\n");
    }

    fn render_chart(&mut self, chart: &BoundChart) {
        let element_id = chart_element_id(chart.dataset);
        let id = encode_double_quoted_attribute(&element_id);
        let figure = chart_to_figure(chart);
        let _ = write!(
            self.html,
            "<div class=\"chart\" id=\"{id}\"></div>\n\
             <script type=\"application/json\" data-figure=\"{id}\">{}</script>\n",
            script_safe_json(&figure)
        );
    }

    fn render_table(&mut self, table: &NormalizedTable) {
        let _ = write!(
            self.html,
            "<div class=\"table-wrap\" style=\"max-height: {}px\">\n<table>\n<thead><tr>",
            TABLE_HEIGHT_PX
        );
        for column in table.columns() {
            let _ = write!(self.html, "<th>{}</th>", encode_text(column));
        }
        self.html.push_str("</tr></thead>\n<tbody>\n");
        for row in table.rows() {
            self.html.push_str("<tr>");
            for cell in row {
                let _ = write!(self.html, "<td>{}</td>", encode_text(&cell.display()));
            }
            self.html.push_str("</tr>\n");
        }
        self.html.push_str("</tbody>\n</table>\n</div>\n");
    }

    fn render_empty_placeholder(&mut self, dataset: DatasetName) {
        let _ = writeln!(self.html, "<div class=\"warning\">No data in {}</div>", dataset.as_str());
    }

    fn render_error(&mut self, error: &PanelError) {
        let _ = writeln!(self.html, "<div class=\"error\">{}</div>", encode_text(&error.to_string()));
    }
}

/// Render the complete dashboard page.
pub fn render_page(dashboard: &Dashboard) -> String {
    let mut surface = HtmlSurface::default();
    render_dashboard(&mut surface, dashboard);
    surface.into_html()
}
