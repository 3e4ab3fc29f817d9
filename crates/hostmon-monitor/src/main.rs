use anyhow::Result;
use hostmon_monitor::config::MonitorConfig;
use hostmon_monitor::logging;
use hostmon_monitor::monitor::Monitor;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let (config_path, explicit) = match std::env::args().nth(1) {
        Some(path) => (path, true),
        None => ("config/monitor.toml".to_string(), false),
    };

    let config = MonitorConfig::load_or_default(&config_path, explicit)?;
    logging::init(&config.log_file)?;
    tracing::info!(config = %config_path, "hostmon-monitor starting");

    let monitor = Monitor::from_config(&config)?;
    hostmon_monitor::run(monitor, &config).await
}
