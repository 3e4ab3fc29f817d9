use crate::{ExportError, LogExporter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    exporter: LogExporter,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let exporter = LogExporter::new(
            dir.path().join("server_monitor.log"),
            dir.path().join("server_log.csv"),
            dir.path().join("server_log.xlsx"),
        );
        Self { dir, exporter }
    }

    fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    fn append(&self, text: &str) {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path("server_monitor.log"))
            .unwrap();
        file.write_all(text.as_bytes()).unwrap();
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        read_csv(&self.path("server_log.csv"))
    }
}

fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn malformed_lines_are_skipped() {
    let mut fx = Fixture::new();
    fx.append("T1:INFO:msg\nmalformed line\n");

    let report = fx.exporter.export().unwrap();
    assert_eq!(report.new_rows, 1);
    assert_eq!(report.skipped_lines, 1);
    assert!(report.rebuilt);

    let rows = fx.csv_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["Time", "Level", "Message"]);
    assert_eq!(rows[1], vec!["T1", "INFO", "msg"]);
    assert!(fx.path("server_log.xlsx").metadata().unwrap().len() > 0);
}

#[test]
fn extra_colons_stay_in_message() {
    let mut fx = Fixture::new();
    fx.append("20260101T101500.000:ERROR:Database insert failed: disk I/O error, code: 10\n");
    fx.exporter.export().unwrap();

    let rows = fx.csv_rows();
    assert_eq!(
        rows[1],
        vec![
            "20260101T101500.000",
            "ERROR",
            "Database insert failed: disk I/O error, code: 10"
        ]
    );
}

#[test]
fn second_export_only_reads_appended_lines() {
    let mut fx = Fixture::new();
    fx.append("T1:INFO:first\n");
    fx.exporter.export().unwrap();
    let cursor = fx.exporter.cursor();

    fx.append("T2:WARN:second\nT3:INFO:third\n");
    let report = fx.exporter.export().unwrap();
    assert_eq!(report.new_rows, 2);
    assert_eq!(report.total_rows, 3);
    assert!(!report.rebuilt);
    assert!(fx.exporter.cursor() > cursor);

    let rows = fx.csv_rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3], vec!["T3", "INFO", "third"]);

    let report = fx.exporter.export().unwrap();
    assert_eq!(report.new_rows, 0);
    assert_eq!(fx.csv_rows().len(), 4);
}

#[test]
fn partial_line_waits_for_newline() {
    let mut fx = Fixture::new();
    fx.append("T1:INFO:done\nT2:INFO:half");
    let report = fx.exporter.export().unwrap();
    assert_eq!(report.new_rows, 1);

    fx.append(" written\n");
    let report = fx.exporter.export().unwrap();
    assert_eq!(report.new_rows, 1);
    assert_eq!(fx.exporter.rows()[1].message, "half written");
}

#[test]
fn shrunk_log_rebuilds_outputs() {
    let mut fx = Fixture::new();
    fx.append("T1:INFO:old entry that is fairly long\nT2:INFO:another old entry\n");
    fx.exporter.export().unwrap();

    std::fs::write(fx.path("server_monitor.log"), "T9:INFO:new\n").unwrap();
    let report = fx.exporter.export().unwrap();
    assert!(report.rebuilt);
    assert_eq!(report.total_rows, 1);

    let rows = fx.csv_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["T9", "INFO", "new"]);
}

#[test]
fn deleted_csv_is_recreated_with_all_rows() {
    let mut fx = Fixture::new();
    fx.append("T1:INFO:one\n");
    fx.exporter.export().unwrap();
    std::fs::remove_file(fx.path("server_log.csv")).unwrap();

    fx.append("T2:INFO:two\n");
    fx.exporter.export().unwrap();
    let rows = fx.csv_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["Time", "Level", "Message"]);
}

#[test]
fn missing_log_is_reported() {
    let mut fx = Fixture::new();
    let err = fx.exporter.export().unwrap_err();
    assert!(matches!(err, ExportError::LogMissing { .. }));
    assert!(!fx.path("server_log.csv").exists());
}
