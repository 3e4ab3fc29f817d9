use crate::data::{
    clamp_refresh, display_log_time, last_alert_sent, load_recent, MAX_REFRESH_SECS,
    MIN_REFRESH_SECS,
};
use crate::error::DashboardError;
use crate::render::{self, ChartData, ChartKind, LiveStats, PageView};
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::Local;
use hostmon_collector::{SampleSource, SystemSampler};
use hostmon_common::types::Sample;
use serde::Deserialize;
use std::sync::{Arc, Mutex};

pub fn build_http_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/download/csv", get(download_csv))
        .route("/download/json", get(download_json))
        .route("/healthz", get(health))
        .with_state(state)
}

/// Raw page options; values that don't parse fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub refresh: Option<String>,
    pub chart: Option<String>,
}

impl PageQuery {
    pub fn refresh_secs(&self) -> Option<u64> {
        self.refresh.as_deref().and_then(|v| v.trim().parse().ok())
    }

    pub fn chart_kind(&self) -> ChartKind {
        match self.chart.as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("bar") => ChartKind::Bar,
            _ => ChartKind::Line,
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn dashboard_page(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Html<String>, DashboardError> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed page query");
            PageQuery::default()
        }
    };
    let chart = query.chart_kind();
    let live = match &state.live {
        Some(sampler) => sample_live(sampler.clone()).await,
        None => None,
    };

    let (samples, load_error) = match load_recent(&state.config.database_path) {
        Ok(samples) => (samples, None),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load samples");
            (Vec::new(), Some(e.to_string()))
        }
    };

    let (last_alert, log_missing) = match last_alert_sent(&state.config.log_file) {
        Ok(record) => (record.map(|r| display_log_time(&r.time)), false),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => (None, true),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read event log");
            (None, false)
        }
    };

    let view = PageView {
        refresh_secs: clamp_refresh(query.refresh_secs(), state.config.default_refresh_secs),
        refresh_min: MIN_REFRESH_SECS,
        refresh_max: MAX_REFRESH_SECS,
        chart,
        live: live.as_ref().map(LiveStats::from),
        row_count: samples.len(),
        latest_time: samples.first().map(Sample::formatted_time),
        load_error,
        last_alert,
        log_missing,
        log_file: state.config.log_file.display().to_string(),
        chart_json: ChartData::build(&samples, chart).to_script_json()?,
    };
    Ok(Html(render::render_page(&state.templates, &view)?))
}

async fn download_csv(State(state): State<AppState>) -> Result<Response, DashboardError> {
    let samples = load_recent(&state.config.database_path)?;
    let body = render::samples_to_csv(&samples)?;
    Ok(attachment(body, "text/csv; charset=utf-8", "csv"))
}

async fn download_json(State(state): State<AppState>) -> Result<Response, DashboardError> {
    let samples = load_recent(&state.config.database_path)?;
    let body = serde_json::to_vec_pretty(&samples)?;
    Ok(attachment(body, "application/json", "json"))
}

fn attachment(body: Vec<u8>, content_type: &str, ext: &str) -> Response {
    let filename = render::download_filename(Local::now().naive_local(), ext);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Samples the dashboard host off the async runtime; failures hide the panel.
async fn sample_live(sampler: Arc<Mutex<SystemSampler>>) -> Option<Sample> {
    let joined = tokio::task::spawn_blocking(move || {
        let mut sampler = sampler.lock().ok()?;
        match sampler.sample() {
            Ok(sample) => Some(sample),
            Err(e) => {
                tracing::warn!(error = %e, "Live sample failed");
                None
            }
        }
    })
    .await;
    joined.ok().flatten()
}
