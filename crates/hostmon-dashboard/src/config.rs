use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Page reload interval when the request does not pick one.
    #[serde(default = "default_refresh_secs")]
    pub default_refresh_secs: u64,
    /// Sample the dashboard host on every page view.
    #[serde(default = "default_live_stats")]
    pub live_stats: bool,
    #[serde(default = "default_disk_mount")]
    pub disk_mount: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8501
}

fn default_database_path() -> PathBuf {
    PathBuf::from("server_data.db")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("server_monitor.log")
}

fn default_refresh_secs() -> u64 {
    10
}

fn default_live_stats() -> bool {
    true
}

fn default_disk_mount() -> String {
    "/".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            http_port: default_http_port(),
            database_path: default_database_path(),
            log_file: default_log_file(),
            default_refresh_secs: default_refresh_secs(),
            live_stats: default_live_stats(),
            disk_mount: default_disk_mount(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(path: &str, explicit: bool) -> anyhow::Result<Self> {
        if !explicit && !Path::new(path).exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}
