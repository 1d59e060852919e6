// Mapper to convert chart specs and panels to Plotly figure JSON
use crate::domain::chart::{BoundChart, BoundColor, BoundField, ChartKind, ChartSpec};
use crate::domain::dashboard::{Dashboard, Panel};
use crate::domain::table::CellValue;
use crate::infrastructure::palettes::{color_scale, nth_color};
use serde_json::{Map, Value, json};

pub const CHART_HEIGHT: u32 = 500;
const SIZE_MAX: f64 = 20.0;

pub fn dashboard_to_json(dashboard: &Dashboard) -> Value {
    let panels: Vec<Value> = dashboard.panels.iter().map(panel_to_json).collect();
    json!({
        "title": dashboard.title,
        "panels": panels,
    })
}

pub fn panel_to_json(panel: &Panel) -> Value {
    let (row, column) = panel.grid_position();
    let mut out = json!({
        "dataset": panel.dataset,
        "title": panel.title(),
        "icon": panel.dataset.icon(),
        "row": row,
        "column": column,
        "table": {
            "columns": panel.table.columns(),
            "rows": panel.table.rows(),
        },
    });

    let extra = match &panel.chart {
        Ok(ChartSpec::Chart(chart)) => json!({"status": "chart", "figure": chart_to_figure(chart)}),
        Ok(ChartSpec::Empty { .. }) => json!({
            "status": "empty",
            "message": format!("No data in {}", panel.dataset),
        }),
        Err(e) => json!({"status": "error", "error": e.to_string()}),
    };
    if let (Value::Object(map), Value::Object(extra)) = (&mut out, extra) {
        map.extend(extra);
    }
    out
}

/// Plotly figure (`data` + `layout`) for a bound chart.
pub fn chart_to_figure(chart: &BoundChart) -> Value {
    let data = match &chart.color {
        Some(BoundColor::Discrete(group)) => grouped_traces(chart, group),
        Some(BoundColor::Continuous(scale)) => vec![continuous_trace(chart, scale)],
        None => vec![single_trace(chart)],
    };

    json!({
        "data": data,
        "layout": layout(chart),
    })
}

fn cells(values: &[CellValue]) -> Vec<Value> {
    values.iter().map(|v| json!(v)).collect()
}

fn text_labels(values: &[CellValue]) -> Vec<String> {
    values.iter().map(CellValue::display).collect()
}

fn base_trace(chart: &BoundChart, rows: &[usize]) -> Map<String, Value> {
    let pick = |field: &BoundField| -> Vec<CellValue> {
        rows.iter().map(|&i| field.values[i].clone()).collect()
    };

    let mut trace = Map::new();
    let (kind, mode) = match chart.kind {
        ChartKind::HorizontalBar | ChartKind::VerticalBar => ("bar", None),
        ChartKind::Line if chart.markers => ("scatter", Some("lines+markers")),
        ChartKind::Line => ("scatter", Some("lines")),
        ChartKind::Scatter => ("scatter", Some("markers")),
    };
    trace.insert("type".into(), json!(kind));
    if let Some(mode) = mode {
        trace.insert("mode".into(), json!(mode));
    }
    if chart.kind == ChartKind::HorizontalBar {
        trace.insert("orientation".into(), json!("h"));
    }
    trace.insert("x".into(), json!(cells(&pick(&chart.x))));
    trace.insert("y".into(), json!(cells(&pick(&chart.y))));

    if let Some(text) = &chart.text {
        trace.insert("text".into(), json!(text_labels(&pick(text))));
        trace.insert("textposition".into(), json!("auto"));
    }
    if let Some(hover) = &chart.hover_name {
        trace.insert("hovertext".into(), json!(text_labels(&pick(hover))));
    }
    if let Some(size) = &chart.size {
        trace.insert(
            "marker".into(),
            json!({
                "size": cells(&pick(size)),
                "sizemode": "area",
                "sizeref": size_ref(&size.values),
            }),
        );
    }

    trace
}

/// Marker size reference so that the largest value maps to `SIZE_MAX` pixels.
fn size_ref(values: &[CellValue]) -> f64 {
    let max = values
        .iter()
        .filter_map(CellValue::as_f64)
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        2.0 * max / (SIZE_MAX * SIZE_MAX)
    } else {
        1.0
    }
}

fn set_marker_color(trace: &mut Map<String, Value>, color: Value) {
    let marker = trace
        .entry("marker")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(marker) = marker {
        marker.insert("color".into(), color);
    }
}

fn single_trace(chart: &BoundChart) -> Value {
    let rows: Vec<usize> = (0..chart.x.values.len()).collect();
    let mut trace = base_trace(chart, &rows);
    let color = nth_color(chart.palette, 0);
    set_marker_color(&mut trace, json!(color));
    if chart.kind == ChartKind::Line {
        trace.insert("line".into(), json!({"color": color}));
    }
    Value::Object(trace)
}

fn continuous_trace(chart: &BoundChart, scale: &BoundField) -> Value {
    let rows: Vec<usize> = (0..chart.x.values.len()).collect();
    let mut trace = base_trace(chart, &rows);
    let stops: Vec<Value> = color_scale(chart.palette)
        .into_iter()
        .map(|(pos, color)| json!([pos, color]))
        .collect();

    set_marker_color(&mut trace, json!(cells(&scale.values)));
    if let Some(Value::Object(marker)) = trace.get_mut("marker") {
        marker.insert("colorscale".into(), json!(stops));
        marker.insert("showscale".into(), json!(true));
        marker.insert("colorbar".into(), json!({"title": {"text": scale.field}}));
    }
    Value::Object(trace)
}

/// One trace per distinct group value, in order of first appearance.
fn grouped_traces(chart: &BoundChart, group: &BoundField) -> Vec<Value> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (row, value) in group.values.iter().enumerate() {
        let key = value.display();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, rows)) => rows.push(row),
            None => groups.push((key, vec![row])),
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(idx, (name, rows))| {
            let mut trace = base_trace(chart, &rows);
            let color = nth_color(chart.palette, idx);
            set_marker_color(&mut trace, json!(color));
            if chart.kind == ChartKind::Line {
                trace.insert("line".into(), json!({"color": color}));
            }
            trace.insert("name".into(), json!(name));
            trace.insert("legendgroup".into(), json!(name));
            trace.insert("showlegend".into(), json!(true));
            Value::Object(trace)
        })
        .collect()
}

fn layout(chart: &BoundChart) -> Value {
    let mut layout = json!({
        "height": CHART_HEIGHT,
        "paper_bgcolor": "#1e1e2f",
        "plot_bgcolor": "#2b2b3c",
        "font": {"color": "#f0f0f0"},
        "margin": {"t": 30, "l": 60, "r": 20, "b": 60},
        "xaxis": {"title": {"text": chart.x.field}, "gridcolor": "#44475a"},
        "yaxis": {"title": {"text": chart.y.field}, "gridcolor": "#44475a"},
    });
    if let Value::Object(map) = &mut layout {
        if matches!(chart.kind, ChartKind::HorizontalBar | ChartKind::VerticalBar) {
            map.insert("barmode".into(), json!("relative"));
        }
        if let Some(BoundColor::Discrete(group)) = &chart.color {
            map.insert("legend".into(), json!({"title": {"text": group.field}}));
        }
    }
    layout
}
