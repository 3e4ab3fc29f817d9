use crate::config::{MonitorConfig, Schedule};
use crate::state::TickState;
use chrono::{Local, NaiveDateTime};
use hostmon_alert::engine::{AlertDecision, AlertEngine};
use hostmon_alert::rules::threshold::ThresholdRule;
use hostmon_alert::summary::DailySummary;
use hostmon_collector::{SampleSource, SamplerConfig, SystemSampler};
use hostmon_common::logline::ALERT_SENT_MARKER;
use hostmon_common::types::{truncate_to_seconds, AlertEvent, Sample};
use hostmon_export::{ExportReport, LogExporter};
use hostmon_notify::channels::telegram::TelegramChannel;
use hostmon_notify::NotificationChannel;
use hostmon_storage::engine::SqliteSampleStore;
use hostmon_storage::SampleStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No channel is configured; the event was only logged.
    NotConfigured,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// Sampling failed, nothing to evaluate.
    Skipped,
    Clear,
    Suppressed,
    Fired(Delivery),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    NotDue,
    Exported(ExportReport),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    NotDue,
    /// Due, but nothing was accumulated; no message is sent.
    Empty,
    Emitted(DailySummary, Delivery),
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub sample: Option<Sample>,
    pub persisted: bool,
    pub alert: AlertOutcome,
    pub export: ExportOutcome,
    pub summary: SummaryOutcome,
}

pub struct Monitor {
    source: Box<dyn SampleSource>,
    store: Box<dyn SampleStore>,
    notifier: Option<Box<dyn NotificationChannel>>,
    engine: AlertEngine,
    exporter: LogExporter,
    schedule: Schedule,
}

impl Monitor {
    pub fn new(
        source: Box<dyn SampleSource>,
        store: Box<dyn SampleStore>,
        notifier: Option<Box<dyn NotificationChannel>>,
        engine: AlertEngine,
        exporter: LogExporter,
        schedule: Schedule,
    ) -> Self {
        Self {
            source,
            store,
            notifier,
            engine,
            exporter,
            schedule,
        }
    }

    pub fn from_config(config: &MonitorConfig) -> anyhow::Result<Self> {
        let source = SystemSampler::new(SamplerConfig {
            cpu_window: config.cpu_sample_window(),
            disk_mount: config.disk_mount.clone(),
        });
        let store = SqliteSampleStore::open(&config.database_path)?;
        tracing::info!(
            path = %config.database_path.display(),
            rows = store.count()?,
            "Opened sample store"
        );
        let notifier = TelegramChannel::from_config(&config.telegram)?
            .map(|c| Box::new(c) as Box<dyn NotificationChannel>);
        if notifier.is_none() {
            tracing::warn!("Telegram credentials not configured, alerts will only be logged");
        }
        let engine = AlertEngine::new(
            ThresholdRule::new(config.thresholds),
            config.alert.cooldown_secs,
        );
        let exporter = LogExporter::new(
            &config.log_file,
            &config.csv_export_path,
            &config.xlsx_export_path,
        );

        Ok(Self::new(
            Box::new(source),
            Box::new(store),
            notifier,
            engine,
            exporter,
            config.schedule(),
        ))
    }

    /// Runs one sampling-and-check cycle. Never fails: every error is logged
    /// and reflected in the returned report.
    pub async fn tick(&mut self, state: &mut TickState) -> TickReport {
        let sample = match self.source.sample() {
            Ok(sample) => Some(sample),
            Err(e) => {
                tracing::error!(error = %e, "Failed to sample host metrics");
                None
            }
        };
        let now = match &sample {
            Some(s) => s.timestamp,
            None => truncate_to_seconds(Local::now().naive_local()),
        };

        let mut persisted = false;
        let mut alert = AlertOutcome::Skipped;
        if let Some(sample) = &sample {
            persisted = self.persist(sample);
            alert = self.check_thresholds(state, sample).await;
            state.accumulator.record(sample);
        }

        let export = if now - state.last_export_at >= self.schedule.export_interval {
            state.last_export_at = now;
            self.export_logs()
        } else {
            ExportOutcome::NotDue
        };

        let summary = if now - state.last_summary_at >= self.schedule.summary_interval {
            state.last_summary_at = now;
            self.emit_summary(state, now).await
        } else {
            SummaryOutcome::NotDue
        };

        TickReport {
            sample,
            persisted,
            alert,
            export,
            summary,
        }
    }

    fn persist(&self, sample: &Sample) -> bool {
        match self.store.insert(sample) {
            Ok(()) => {
                tracing::info!(
                    cpu = sample.cpu_percent,
                    memory = sample.memory_percent,
                    disk = sample.disk_percent,
                    "Saved system stats to database"
                );
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Database insert failed");
                false
            }
        }
    }

    async fn check_thresholds(&self, state: &mut TickState, sample: &Sample) -> AlertOutcome {
        match self.engine.evaluate(sample, state.last_alert_at) {
            AlertDecision::Clear => AlertOutcome::Clear,
            AlertDecision::Suppressed { .. } => AlertOutcome::Suppressed,
            AlertDecision::Fire(event) => {
                tracing::warn!(breached = ?event.breached, "Usage over threshold");
                state.last_alert_at = Some(sample.timestamp);
                AlertOutcome::Fired(self.deliver(&event).await)
            }
        }
    }

    fn export_logs(&mut self) -> ExportOutcome {
        match self.exporter.export() {
            Ok(report) => {
                tracing::info!(
                    new_rows = report.new_rows,
                    total_rows = report.total_rows,
                    skipped = report.skipped_lines,
                    "Logs exported to CSV and Excel"
                );
                ExportOutcome::Exported(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error exporting logs");
                ExportOutcome::Failed
            }
        }
    }

    /// Sends the summary, exports, and resets the accumulator.
    async fn emit_summary(&mut self, state: &mut TickState, now: NaiveDateTime) -> SummaryOutcome {
        let summary = state.accumulator.drain();
        let outcome = match summary {
            Some(summary) => {
                tracing::info!(
                    entries = summary.entries,
                    avg_cpu = summary.avg_cpu,
                    avg_memory = summary.avg_memory,
                    avg_disk = summary.avg_disk,
                    "Daily summary computed"
                );
                let delivery = self.deliver(&summary.to_event(now)).await;
                SummaryOutcome::Emitted(summary, delivery)
            }
            None => {
                tracing::info!("Daily summary skipped, zero entries recorded");
                SummaryOutcome::Empty
            }
        };
        self.export_logs();
        outcome
    }

    async fn deliver(&self, event: &AlertEvent) -> Delivery {
        let Some(channel) = &self.notifier else {
            tracing::warn!(kind = ?event.kind, "No notification channel, alert not delivered");
            return Delivery::NotConfigured;
        };
        match channel.send(event).await {
            Ok(()) => {
                tracing::info!(
                    channel = channel.channel_name(),
                    kind = ?event.kind,
                    "{ALERT_SENT_MARKER}"
                );
                Delivery::Sent
            }
            Err(e) => {
                tracing::error!(
                    channel = channel.channel_name(),
                    error = %e,
                    "Alert notification failed"
                );
                Delivery::Failed
            }
        }
    }
}
