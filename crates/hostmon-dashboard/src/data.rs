//! Reads the files the monitor writes.

use chrono::NaiveDateTime;
use hostmon_common::logline::{is_alert_sent, parse_log_line, LogRecord, LOG_TIMESTAMP_FORMAT};
use hostmon_common::types::{Sample, SAMPLE_TIME_FORMAT};
use hostmon_storage::engine::SqliteSampleStore;
use hostmon_storage::{SampleStore, RECENT_LIMIT};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const MIN_REFRESH_SECS: u64 = 5;
pub const MAX_REFRESH_SECS: u64 = 60;

/// The newest [`RECENT_LIMIT`] samples, newest first.
pub fn load_recent(db_path: &Path) -> hostmon_storage::Result<Vec<Sample>> {
    SqliteSampleStore::open_existing(db_path)?.recent(RECENT_LIMIT)
}

/// The last event log line recording a delivered alert.
pub fn last_alert_sent(log_path: &Path) -> std::io::Result<Option<LogRecord>> {
    let reader = BufReader::new(File::open(log_path)?);
    let mut last = None;
    for line in reader.split(b'\n') {
        let line = line?;
        let text = String::from_utf8_lossy(&line);
        if let Some(record) = parse_log_line(&text) {
            if is_alert_sent(&record) {
                last = Some(record);
            }
        }
    }
    Ok(last)
}

/// Render an event log timestamp like the store's; unknown formats pass through.
pub fn display_log_time(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, LOG_TIMESTAMP_FORMAT) {
        Ok(ts) => ts.format(SAMPLE_TIME_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn clamp_refresh(requested: Option<u64>, default: u64) -> u64 {
    requested
        .unwrap_or(default)
        .clamp(MIN_REFRESH_SECS, MAX_REFRESH_SECS)
}
