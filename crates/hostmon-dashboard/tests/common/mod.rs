#![allow(dead_code)]

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{Duration, NaiveDate};
use hostmon_common::types::Sample;
use hostmon_dashboard::app;
use hostmon_dashboard::config::DashboardConfig;
use hostmon_dashboard::render;
use hostmon_dashboard::state::AppState;
use hostmon_storage::engine::SqliteSampleStore;
use hostmon_storage::SampleStore;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub struct TestContext {
    pub temp_dir: TempDir,
    pub state: AppState,
    pub app: axum::Router,
}

impl TestContext {
    pub fn db_path(&self) -> PathBuf {
        self.temp_dir.path().join("server_data.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.temp_dir.path().join("server_monitor.log")
    }

    pub fn write_log(&self, content: &str) {
        std::fs::write(self.log_path(), content).expect("log should be writable");
    }

    /// Inserts `count` samples one minute apart; sample `i` has cpu = i.
    pub fn seed_samples(&self, count: i64) -> Result<()> {
        let store = SqliteSampleStore::open(&self.db_path())?;
        for i in 0..count {
            store.insert(&make_sample(i))?;
        }
        Ok(())
    }
}

pub fn make_sample(i: i64) -> Sample {
    Sample {
        timestamp: NaiveDate::from_ymd_opt(2026, 7, 1)
            .expect("valid date")
            .and_hms_opt(8, 0, 0)
            .expect("valid time")
            + Duration::minutes(i),
        cpu_percent: i as f64,
        memory_percent: 50.0,
        disk_percent: 40.0,
        bytes_sent_mb: 1.5,
        bytes_recv_mb: 2.5,
    }
}

pub fn build_test_context() -> Result<TestContext> {
    let temp_dir = tempfile::tempdir()?;
    let config = DashboardConfig {
        database_path: temp_dir.path().join("server_data.db"),
        log_file: temp_dir.path().join("server_monitor.log"),
        live_stats: false,
        ..DashboardConfig::default()
    };
    let state = AppState {
        config: Arc::new(config),
        templates: Arc::new(render::build_templates()?),
        live: None,
    };
    let app = app::build_http_app(state.clone());
    Ok(TestContext {
        temp_dir,
        state,
        app,
    })
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}
