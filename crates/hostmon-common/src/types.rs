use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Wall-clock format of the `time` column and of serialized samples.
pub const SAMPLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Network counters are reported in MB, i.e. bytes / 2^20.
pub const BYTES_PER_MB: f64 = 1_048_576.0;

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Round a utilization percentage to one decimal place.
pub fn round_percent(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Drop sub-second precision so stored timestamps match [`SAMPLE_TIME_FORMAT`].
pub fn truncate_to_seconds(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// One point-in-time reading of host utilization.
///
/// Serialized field names match the columns of the `stats` table so that
/// dashboard exports and the store agree.
///
/// # Examples
///
/// ```
/// use hostmon_common::types::bytes_to_mb;
///
/// assert_eq!(bytes_to_mb(3 * 1_048_576), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "time", with = "sample_time")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "cpu")]
    pub cpu_percent: f64,
    #[serde(rename = "memory")]
    pub memory_percent: f64,
    #[serde(rename = "disk")]
    pub disk_percent: f64,
    #[serde(rename = "sent")]
    pub bytes_sent_mb: f64,
    #[serde(rename = "recv")]
    pub bytes_recv_mb: f64,
}

impl Sample {
    pub fn percent(&self, metric: MetricKind) -> f64 {
        match metric {
            MetricKind::Cpu => self.cpu_percent,
            MetricKind::Memory => self.memory_percent,
            MetricKind::Disk => self.disk_percent,
        }
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format(SAMPLE_TIME_FORMAT).to_string()
    }
}

mod sample_time {
    use super::SAMPLE_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(SAMPLE_TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, SAMPLE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Percentage metrics that carry an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Cpu, MetricKind::Memory, MetricKind::Disk];
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::Cpu => write!(f, "CPU"),
            MetricKind::Memory => write!(f, "Memory"),
            MetricKind::Disk => write!(f, "Disk"),
        }
    }
}

/// Alert severity level, ordered from lowest to highest.
///
/// # Examples
///
/// ```
/// use hostmon_common::types::Severity;
///
/// let sev: Severity = "warning".parse().unwrap();
/// assert_eq!(sev, Severity::Warning);
/// assert_eq!(sev.to_string(), "warning");
/// assert!(Severity::Warning > Severity::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            _ => Err(format!("unknown severity: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Threshold,
    DailySummary,
}

/// A message ready for delivery through a notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub kind: AlertKind,
    pub severity: Severity,
    /// Markdown body as delivered to the channel.
    pub message: String,
    pub timestamp: NaiveDateTime,
    /// Metrics over their limit. Empty for summaries.
    #[serde(default)]
    pub breached: Vec<MetricKind>,
}
