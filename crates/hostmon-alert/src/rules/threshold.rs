use hostmon_common::types::{AlertEvent, AlertKind, MetricKind, Sample, Severity};
use serde::Deserialize;

/// Per-metric upper limits, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_cpu")]
    pub cpu: f64,
    #[serde(default = "default_memory")]
    pub memory: f64,
    #[serde(default = "default_disk")]
    pub disk: f64,
}

fn default_cpu() -> f64 {
    80.0
}

fn default_memory() -> f64 {
    75.0
}

fn default_disk() -> f64 {
    85.0
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: default_cpu(),
            memory: default_memory(),
            disk: default_disk(),
        }
    }
}

impl Thresholds {
    pub fn limit(&self, metric: MetricKind) -> f64 {
        match metric {
            MetricKind::Cpu => self.cpu,
            MetricKind::Memory => self.memory,
            MetricKind::Disk => self.disk,
        }
    }
}

/// Fires when any metric is strictly above its limit. All breaches of one
/// sample collapse into a single message.
#[derive(Debug, Clone, Default)]
pub struct ThresholdRule {
    pub thresholds: Thresholds,
}

impl ThresholdRule {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn breaches(&self, sample: &Sample) -> Vec<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .filter(|m| sample.percent(*m) > self.thresholds.limit(*m))
            .collect()
    }

    pub fn evaluate(&self, sample: &Sample) -> Option<AlertEvent> {
        let breached = self.breaches(sample);
        if breached.is_empty() {
            return None;
        }
        Some(AlertEvent {
            kind: AlertKind::Threshold,
            severity: Severity::Warning,
            message: self.render(sample),
            timestamp: sample.timestamp,
            breached,
        })
    }

    /// Markdown body listing every metric, over its limit or not.
    pub fn render(&self, sample: &Sample) -> String {
        let t = &self.thresholds;
        format!(
            "⚠️ *Server Alert: High Usage*\n\n\
             CPU Usage: {}% (Limit: {}%)\n\
             Memory Usage: {}% (Limit: {}%)\n\
             Disk Usage: {}% (Limit: {}%)\n\
             Network Sent: {:.2} MB\n\
             Network Received: {:.2} MB",
            sample.cpu_percent,
            t.cpu,
            sample.memory_percent,
            t.memory,
            sample.disk_percent,
            t.disk,
            sample.bytes_sent_mb,
            sample.bytes_recv_mb,
        )
    }
}
