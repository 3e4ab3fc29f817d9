use hostmon_alert::rules::threshold::Thresholds;
use hostmon_notify::channels::telegram::TelegramConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
    #[serde(default = "default_export_interval")]
    pub export_interval_secs: u64,
    #[serde(default = "default_summary_interval")]
    pub summary_interval_secs: u64,
    /// Blocking window over which CPU usage is measured.
    #[serde(default = "default_cpu_sample_window")]
    pub cpu_sample_window_ms: u64,
    #[serde(default = "default_disk_mount")]
    pub disk_mount: String,
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_csv_export_path")]
    pub csv_export_path: PathBuf,
    #[serde(default = "default_xlsx_export_path")]
    pub xlsx_export_path: PathBuf,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub alert: AlertConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertConfig {
    /// Minimum seconds between threshold alerts; 0 alerts on every breaching tick.
    #[serde(default)]
    pub cooldown_secs: u64,
}

fn default_check_interval() -> u64 {
    60
}

fn default_export_interval() -> u64 {
    60
}

fn default_summary_interval() -> u64 {
    24 * 60 * 60
}

fn default_cpu_sample_window() -> u64 {
    1000
}

fn default_disk_mount() -> String {
    "/".to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("server_data.db")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("server_monitor.log")
}

fn default_csv_export_path() -> PathBuf {
    PathBuf::from("server_log.csv")
}

fn default_xlsx_export_path() -> PathBuf {
    PathBuf::from("server_log.xlsx")
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval(),
            export_interval_secs: default_export_interval(),
            summary_interval_secs: default_summary_interval(),
            cpu_sample_window_ms: default_cpu_sample_window(),
            disk_mount: default_disk_mount(),
            database_path: default_database_path(),
            log_file: default_log_file(),
            csv_export_path: default_csv_export_path(),
            xlsx_export_path: default_xlsx_export_path(),
            thresholds: Thresholds::default(),
            alert: AlertConfig::default(),
            telegram: TelegramConfig::default(),
        }
    }
}

/// Intervals of the periodic jobs run from the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub export_interval: chrono::Duration,
    pub summary_interval: chrono::Duration,
}

impl MonitorConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to built-in defaults when the file is absent
    /// and was not explicitly requested.
    pub fn load_or_default(path: &str, explicit: bool) -> anyhow::Result<Self> {
        if !explicit && !Path::new(path).exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("check_interval_secs", self.check_interval_secs),
            ("export_interval_secs", self.export_interval_secs),
            ("summary_interval_secs", self.summary_interval_secs),
        ] {
            if value == 0 {
                anyhow::bail!("{name} must be greater than zero");
            }
        }
        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn cpu_sample_window(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_window_ms)
    }

    pub fn schedule(&self) -> Schedule {
        Schedule {
            export_interval: secs(self.export_interval_secs),
            summary_interval: secs(self.summary_interval_secs),
        }
    }
}

fn secs(value: u64) -> chrono::Duration {
    i64::try_from(value)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX)
}
