//! Host metric sampling.
//!
//! Each [`Collector`] reads one category of host metrics through `sysinfo`.
//! [`SystemSampler`] runs all of them and assembles a [`Sample`], and the
//! [`SampleSource`] trait is what the monitor loop depends on.

pub mod cpu;
pub mod disk;
pub mod error;
pub mod memory;
pub mod network;


use chrono::Local;
use hostmon_common::types::{round_percent, truncate_to_seconds, Sample};
use std::time::Duration;

pub use error::{CollectError, Result};

/// A single-category metric reader.
pub trait Collector: Send {
    type Reading;

    /// Collector name used in log fields (e.g. `"cpu"`, `"disk"`).
    fn name(&self) -> &str;

    /// Reads the current value.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric is unavailable on this host.
    fn collect(&mut self) -> Result<Self::Reading>;
}

/// Anything that can produce one [`Sample`] per monitor tick.
pub trait SampleSource: Send {
    fn sample(&mut self) -> Result<Sample>;
}

#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub cpu_window: Duration,
    pub disk_mount: String,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            cpu_window: Duration::from_secs(1),
            disk_mount: "/".to_string(),
        }
    }
}

pub struct SystemSampler {
    cpu: cpu::CpuCollector,
    memory: memory::MemoryCollector,
    disk: disk::DiskCollector,
    network: network::NetworkCollector,
}

impl SystemSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            cpu: cpu::CpuCollector::new(config.cpu_window),
            memory: memory::MemoryCollector::new(),
            disk: disk::DiskCollector::new(config.disk_mount),
            network: network::NetworkCollector::new(),
        }
    }
}

impl SampleSource for SystemSampler {
    fn sample(&mut self) -> Result<Sample> {
        // CPU blocks for its sampling window, so the timestamp marks the end of it.
        let cpu = read(&mut self.cpu)?;
        let memory = read(&mut self.memory)?;
        let disk = read(&mut self.disk)?;
        let traffic = read(&mut self.network)?;

        let sample = Sample {
            timestamp: truncate_to_seconds(Local::now().naive_local()),
            cpu_percent: round_percent(cpu),
            memory_percent: round_percent(memory),
            disk_percent: round_percent(disk),
            bytes_sent_mb: traffic.sent_mb,
            bytes_recv_mb: traffic.recv_mb,
        };
        tracing::debug!(
            cpu = sample.cpu_percent,
            memory = sample.memory_percent,
            disk = sample.disk_percent,
            "Sampled host metrics"
        );
        Ok(sample)
    }
}

fn read<C: Collector>(collector: &mut C) -> Result<C::Reading> {
    match collector.collect() {
        Ok(reading) => Ok(reading),
        Err(e) => {
            tracing::warn!(collector = collector.name(), error = %e, "Collector failed");
            Err(e)
        }
    }
}

/// `used / total * 100`, or 0 for an empty total.
pub(crate) fn used_percent(total: u64, available: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(available);
    (used as f64 / total as f64) * 100.0
}
