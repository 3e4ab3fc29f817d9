//! The event log contract: one `<timestamp>:<LEVEL>:<message>` entry per line.

use serde::{Deserialize, Serialize};

/// Timestamp format for event log lines. Basic ISO 8601 has no colons, so the
/// first two colons on a line always delimit the level.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3f";

/// Message logged by the monitor after a successful alert delivery.
pub const ALERT_SENT_MARKER: &str = "Alert notification sent";

/// A parsed event log line. Serializes with the export column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Level")]
    pub level: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl LogRecord {
    pub const COLUMNS: [&'static str; 3] = ["Time", "Level", "Message"];

    pub fn fields(&self) -> [&str; 3] {
        [&self.time, &self.level, &self.message]
    }
}

/// Split a trimmed line at its first two colons.
///
/// Returns `None` for lines with fewer than two colons; everything after the
/// second colon, colons included, is the message.
///
/// # Examples
///
/// ```
/// use hostmon_common::logline::parse_log_line;
///
/// let rec = parse_log_line("T1:INFO:db at 10:30").unwrap();
/// assert_eq!(rec.level, "INFO");
/// assert_eq!(rec.message, "db at 10:30");
/// assert!(parse_log_line("no separators").is_none());
/// ```
pub fn parse_log_line(line: &str) -> Option<LogRecord> {
    let mut parts = line.trim().splitn(3, ':');
    let time = parts.next()?;
    let level = parts.next()?;
    let message = parts.next()?;
    Some(LogRecord {
        time: time.to_string(),
        level: level.to_string(),
        message: message.to_string(),
    })
}

/// True when the line records a delivered alert.
pub fn is_alert_sent(record: &LogRecord) -> bool {
    record.message.contains(ALERT_SENT_MARKER)
}
