use crate::config::DashboardConfig;
use crate::data::{clamp_refresh, display_log_time, last_alert_sent};
use crate::render::{download_filename, samples_to_csv, ChartData, ChartKind, BAR_CHART_ROWS};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use hostmon_common::types::Sample;
use tempfile::TempDir;

fn at(minutes: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 7, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
        + Duration::minutes(minutes)
}

/// Newest first, as the store returns them.
fn stored_rows(count: i64) -> Vec<Sample> {
    (0..count)
        .rev()
        .map(|i| Sample {
            timestamp: at(i),
            cpu_percent: i as f64,
            memory_percent: 10.0,
            disk_percent: 20.0,
            bytes_sent_mb: i as f64 * 2.0,
            bytes_recv_mb: i as f64 * 3.0,
        })
        .collect()
}

#[test]
fn refresh_is_clamped_to_range() {
    assert_eq!(clamp_refresh(None, 10), 10);
    assert_eq!(clamp_refresh(Some(0), 10), 5);
    assert_eq!(clamp_refresh(Some(45), 10), 45);
    assert_eq!(clamp_refresh(Some(3600), 10), 60);
    assert_eq!(clamp_refresh(None, 1), 5);
}

#[test]
fn log_times_are_reformatted() {
    assert_eq!(display_log_time("20260701T093000.125"), "2026-07-01 09:30:00");
    assert_eq!(display_log_time("T1"), "T1");
}

#[test]
fn last_alert_picks_final_marker_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("server_monitor.log");
    std::fs::write(
        &path,
        "A:INFO:Alert notification sent\nB:ERROR:Alert notification failed\nC:INFO:Alert notification sent kind=DailySummary\nD:INFO:Saved system stats\n",
    )
    .unwrap();
    assert_eq!(last_alert_sent(&path).unwrap().unwrap().time, "C");

    std::fs::write(&path, "A:INFO:nothing here\n").unwrap();
    assert!(last_alert_sent(&path).unwrap().is_none());

    let missing = last_alert_sent(&dir.path().join("absent.log")).unwrap_err();
    assert_eq!(missing.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn line_chart_uses_all_rows_oldest_first() {
    let data = ChartData::build(&stored_rows(30), ChartKind::Line);
    assert_eq!(data.usage_labels.len(), 30);
    assert_eq!(data.usage_labels[0], "2026-07-01 08:00:00");
    assert_eq!(data.cpu[29], 29.0);
    assert_eq!(data.sent.len(), 30);
}

#[test]
fn bar_chart_keeps_last_ten_readings() {
    let data = ChartData::build(&stored_rows(30), ChartKind::Bar);
    assert_eq!(data.usage_labels.len(), BAR_CHART_ROWS);
    assert_eq!(data.cpu.first(), Some(&20.0));
    assert_eq!(data.cpu.last(), Some(&29.0));
    assert_eq!(data.network_labels.len(), 30);

    let few = ChartData::build(&stored_rows(3), ChartKind::Bar);
    assert_eq!(few.cpu, vec![0.0, 1.0, 2.0]);
}

#[test]
fn chart_json_cannot_close_script_tag() {
    let mut data = ChartData::default();
    data.usage_labels.push("</script>".to_string());
    let json = data.to_script_json().unwrap();
    assert!(!json.contains("</script>"));
    assert!(json.contains(r"<\/script>"));
}

#[test]
fn empty_csv_still_has_header() {
    let csv = String::from_utf8(samples_to_csv(&[]).unwrap()).unwrap();
    assert_eq!(csv, "time,cpu,memory,disk,sent,recv\n");
}

#[test]
fn download_names_are_timestamped() {
    assert_eq!(
        download_filename(at(75), "json"),
        "server_log_20260701_091500.json"
    );
}

#[test]
fn config_defaults() {
    let config: DashboardConfig = toml::from_str("http_port = 9000").unwrap();
    assert_eq!(config.http_port, 9000);
    assert_eq!(config.default_refresh_secs, 10);
    assert!(config.live_stats);
    assert_eq!(config.listen_addr(), "127.0.0.1:9000");
}
