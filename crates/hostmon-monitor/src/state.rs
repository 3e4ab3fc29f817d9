use chrono::NaiveDateTime;
use hostmon_alert::summary::DailyAccumulator;

/// Everything the monitor loop carries from one tick to the next.
///
/// Timestamps are replaced wholesale when their job runs, never adjusted.
#[derive(Debug, Clone, PartialEq)]
pub struct TickState {
    pub accumulator: DailyAccumulator,
    pub last_summary_at: NaiveDateTime,
    pub last_export_at: NaiveDateTime,
    pub last_alert_at: Option<NaiveDateTime>,
}

impl TickState {
    pub fn new(started_at: NaiveDateTime) -> Self {
        Self {
            accumulator: DailyAccumulator::default(),
            last_summary_at: started_at,
            last_export_at: started_at,
            last_alert_at: None,
        }
    }
}
