// Excel/ODS import via calamine

use std::path::Path;
use std::time::Instant;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::{NaiveDate, TimeDelta};

use sipot_engine::{CellValue, Sheet};

use crate::error::LoadError;

/// Import the first worksheet of an Excel file (xlsx, xlsm, xls, xlsb, ods).
///
/// Cells keep their absolute position: a range that starts at `C4` yields
/// three leading empty rows and two leading empty columns.
pub fn import(path: &Path) -> Result<Sheet, LoadError> {
    let start_time = Instant::now();

    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| LoadError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(LoadError::NoSheets {
            path: path.to_path_buf(),
        });
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::Workbook {
            path: path.to_path_buf(),
            message: format!("failed to read sheet '{}': {}", sheet_name, e),
        })?;

    // Range start offset (data may not begin at A1)
    let (data_start_row, data_start_col) = range.start().unwrap_or((0, 0));
    let (data_start_row, data_start_col) = (data_start_row as usize, data_start_col as usize);

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); data_start_row];
    for row in range.rows() {
        let mut values = vec![CellValue::Empty; data_start_col];
        values.extend(row.iter().map(convert_cell));
        rows.push(values);
    }

    let sheet = Sheet::new(sheet_name, rows);
    tracing::debug!(
        path = %path.display(),
        sheet = %sheet.name,
        rows = sheet.height(),
        cols = sheet.width(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "workbook imported"
    );
    Ok(sheet)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        // One logical line per cell
        Data::String(s) => crate::csv::field_value(&s.replace(['\r', '\n'], " ")),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),
        // Store error as text representation
        Data::Error(e) => CellValue::text(format!("#{:?}", e)),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            match serial_to_text(serial) {
                Some(text) => CellValue::text(text),
                None => CellValue::Number(serial),
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
    }
}

/// Render an Excel serial date as `YYYY-MM-DD HH:MM:SS`, or `HH:MM:SS` for a
/// pure time of day (serial below one).
///
/// Assumes the 1900 date system; serials before 1900-03-01 are off by the
/// phantom 1900-02-29, which templates never reach.
fn serial_to_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let seconds = (serial * 86_400.0).round() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let datetime = epoch.checked_add_signed(TimeDelta::try_seconds(seconds)?)?;

    if serial < 1.0 {
        Some(datetime.format("%H:%M:%S").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
