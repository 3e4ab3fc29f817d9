//! File writers for exported log records.

use crate::Result;
use hostmon_common::logline::LogRecord;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::OpenOptions;
use std::path::Path;

/// Longest string a worksheet cell accepts.
const XLSX_MAX_CELL_CHARS: usize = 32_767;

/// Writes records to `path`. With `truncate` the file is replaced and gets a
/// header row, otherwise the records are appended.
pub fn write_csv<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a LogRecord>,
    truncate: bool,
) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(truncate)
        .append(!truncate)
        .open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if truncate {
        writer.write_record(LogRecord::COLUMNS)?;
    }
    for record in records {
        writer.write_record(record.fields())?;
    }
    writer.flush()?;
    Ok(())
}

/// Replaces the workbook at `path` with one sheet holding every record.
pub fn write_xlsx(path: &Path, records: &[LogRecord]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in LogRecord::COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, value) in record.fields().iter().enumerate() {
            sheet.write_string(row, col as u16, clip_cell(value))?;
        }
    }
    sheet.autofit();

    workbook.save(path)?;
    Ok(())
}

fn clip_cell(value: &str) -> &str {
    match value.char_indices().nth(XLSX_MAX_CELL_CHARS) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
