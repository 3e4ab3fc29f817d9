//! Incremental export of the event log to CSV and XLSX.
//!
//! [`LogExporter`] remembers how far into the log it has read. Each export
//! parses only the complete lines appended since the previous one, appends
//! them to the CSV file and rewrites the workbook from its row cache.

pub mod error;
pub mod writers;

#[cfg(test)]
mod tests;

use hostmon_common::logline::{parse_log_line, LogRecord};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub use error::{ExportError, Result};

/// Data rows a worksheet can hold below its header row.
pub const XLSX_MAX_ROWS: usize = 1_048_575;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub new_rows: usize,
    pub skipped_lines: usize,
    pub total_rows: usize,
    /// Outputs were rewritten from the start of the log.
    pub rebuilt: bool,
}

#[derive(Debug)]
pub struct LogExporter {
    log_path: PathBuf,
    csv_path: PathBuf,
    xlsx_path: PathBuf,
    /// Byte offset just past the last exported line.
    cursor: u64,
    rows: Vec<LogRecord>,
}

impl LogExporter {
    pub fn new(
        log_path: impl Into<PathBuf>,
        csv_path: impl Into<PathBuf>,
        xlsx_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            log_path: log_path.into(),
            csv_path: csv_path.into(),
            xlsx_path: xlsx_path.into(),
            cursor: 0,
            rows: Vec::new(),
        }
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn rows(&self) -> &[LogRecord] {
        &self.rows
    }

    pub fn export(&mut self) -> Result<ExportReport> {
        let len = match std::fs::metadata(&self.log_path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExportError::LogMissing {
                    path: self.log_path.display().to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if len < self.cursor {
            tracing::info!(
                log = %self.log_path.display(),
                previous = self.cursor,
                current = len,
                "Event log shrank, rebuilding exports"
            );
            self.cursor = 0;
            self.rows.clear();
        }
        let rebuilt = self.cursor == 0;

        let (chunk, consumed) = read_complete_lines(&self.log_path, self.cursor)?;
        let mut fresh = Vec::new();
        let mut skipped_lines = 0;
        for line in chunk.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_log_line(line) {
                Some(record) => fresh.push(record),
                None => skipped_lines += 1,
            }
        }

        let rewrite_csv = rebuilt || !self.csv_path.exists();
        if rewrite_csv {
            let all: Vec<&LogRecord> = self.rows.iter().chain(fresh.iter()).collect();
            writers::write_csv(&self.csv_path, all, true)?;
        } else {
            writers::write_csv(&self.csv_path, fresh.iter(), false)?;
        }

        let new_rows = fresh.len();
        self.rows.extend(fresh);
        if self.rows.len() > XLSX_MAX_ROWS {
            let excess = self.rows.len() - XLSX_MAX_ROWS;
            self.rows.drain(..excess);
        }
        self.cursor += consumed;

        writers::write_xlsx(&self.xlsx_path, &self.rows)?;

        Ok(ExportReport {
            new_rows,
            skipped_lines,
            total_rows: self.rows.len(),
            rebuilt,
        })
    }
}

/// Reads from `offset` up to and including the last newline.
///
/// Returns the text and the number of bytes it covers; a trailing partial
/// line is left for the next read.
fn read_complete_lines(path: &Path, offset: u64) -> Result<(String, u64)> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;

    let end = match buf.iter().rposition(|b| *b == b'\n') {
        Some(pos) => pos + 1,
        None => 0,
    };
    buf.truncate(end);
    Ok((String::from_utf8_lossy(&buf).into_owned(), end as u64))
}
