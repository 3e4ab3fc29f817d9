use anyhow::Result;
use hostmon_collector::{SamplerConfig, SystemSampler};
use hostmon_dashboard::app;
use hostmon_dashboard::config::DashboardConfig;
use hostmon_dashboard::render;
use hostmon_dashboard::state::AppState;
use std::sync::{Arc, Mutex};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hostmon=info".parse()?))
        .init();

    let (config_path, explicit) = match std::env::args().nth(1) {
        Some(path) => (path, true),
        None => ("config/dashboard.toml".to_string(), false),
    };
    let config = DashboardConfig::load_or_default(&config_path, explicit)?;
    tracing::info!(config = %config_path, "hostmon-dashboard starting");

    let live = config.live_stats.then(|| {
        Arc::new(Mutex::new(SystemSampler::new(SamplerConfig {
            disk_mount: config.disk_mount.clone(),
            ..SamplerConfig::default()
        })))
    });
    let addr = config.listen_addr();
    let state = AppState {
        config: Arc::new(config),
        templates: Arc::new(render::build_templates()?),
        live,
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Dashboard listening");
    axum::serve(listener, app::build_http_app(state))
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            tracing::info!("Shutting down gracefully");
        })
        .await?;

    Ok(())
}
