// HTTP request handlers
use crate::domain::dataset::DatasetName;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::figure_mapper::{dashboard_to_json, panel_to_json};
use crate::infrastructure::http_response::{accepts_brotli, html_response, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_page;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full HTML dashboard
pub async fn dashboard_page(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.dashboard_service.get_dashboard().await;
    let html = render_page(&dashboard);

    match html_response(html, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// All panels as JSON
pub async fn dashboard_json(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = state.dashboard_service.get_dashboard().await;

    match json_response(&dashboard_to_json(&dashboard), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// A single dataset panel as JSON
pub async fn dataset_json(
    Path(name): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let dataset = match name.parse::<DatasetName>() {
        Ok(dataset) => dataset,
        Err(e) => return (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    };

    let panel = state.dashboard_service.get_panel(dataset).await;

    match json_response(&panel_to_json(&panel), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Stream panels as they become ready (NDJSON)
pub async fn stream_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rx = state.streaming_service.stream_dashboard();
    stream_from_receiver(rx)
}
