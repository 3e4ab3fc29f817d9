use chrono::NaiveDateTime;
use hostmon_common::types::{AlertEvent, AlertKind, Sample, Severity};

/// Utilization values recorded since the last summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyAccumulator {
    cpu: Vec<f64>,
    memory: Vec<f64>,
    disk: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub avg_cpu: f64,
    pub avg_memory: f64,
    pub avg_disk: f64,
    pub entries: usize,
}

impl DailyAccumulator {
    pub fn record(&mut self, sample: &Sample) {
        self.cpu.push(sample.cpu_percent);
        self.memory.push(sample.memory_percent);
        self.disk.push(sample.disk_percent);
    }

    pub fn len(&self) -> usize {
        self.cpu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty()
    }

    /// Means of everything recorded so far; `None` when nothing was recorded.
    pub fn summarize(&self) -> Option<DailySummary> {
        if self.is_empty() {
            return None;
        }
        Some(DailySummary {
            avg_cpu: mean(&self.cpu),
            avg_memory: mean(&self.memory),
            avg_disk: mean(&self.disk),
            entries: self.len(),
        })
    }

    /// Summarizes and clears in one step.
    pub fn drain(&mut self) -> Option<DailySummary> {
        let summary = self.summarize();
        *self = Self::default();
        summary
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl DailySummary {
    pub fn render(&self) -> String {
        format!(
            "📅 *Daily Server Summary*\n\n\
             Avg CPU: {:.2}%\n\
             Avg Memory: {:.2}%\n\
             Avg Disk: {:.2}%\n\
             Entries Recorded: {}",
            self.avg_cpu, self.avg_memory, self.avg_disk, self.entries,
        )
    }

    pub fn to_event(&self, timestamp: NaiveDateTime) -> AlertEvent {
        AlertEvent {
            kind: AlertKind::DailySummary,
            severity: Severity::Info,
            message: self.render(),
            timestamp,
            breached: Vec::new(),
        }
    }
}
