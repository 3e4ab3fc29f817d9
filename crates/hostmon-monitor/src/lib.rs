//! The host monitor loop.
//!
//! Every tick samples the host, persists the sample, evaluates alert
//! thresholds and runs the periodic log export and daily summary once they
//! are due. All scheduler state lives in [`state::TickState`], which the loop
//! owns and passes into [`monitor::Monitor::tick`].

pub mod config;
pub mod logging;
pub mod monitor;
pub mod state;


use chrono::Local;
use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};

use crate::monitor::Monitor;
use crate::state::TickState;

/// Runs ticks every `config.check_interval_secs` until Ctrl-C.
pub async fn run(mut monitor: Monitor, config: &config::MonitorConfig) -> anyhow::Result<()> {
    let mut state = TickState::new(Local::now().naive_local());
    let mut ticker = interval(config.check_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        interval_secs = config.check_interval_secs,
        export_interval_secs = config.export_interval_secs,
        summary_interval_secs = config.summary_interval_secs,
        database = %config.database_path.display(),
        "Starting monitor loop"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = monitor.tick(&mut state).await;
                tracing::debug!(
                    persisted = report.persisted,
                    alert = ?report.alert,
                    accumulated = state.accumulator.len(),
                    "Tick complete"
                );
            }
            _ = signal::ctrl_c() => {
                tracing::info!("Shutting down gracefully");
                break;
            }
        }
    }

    Ok(())
}
