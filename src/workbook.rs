//! Workbook I/O: loading the review sheet and editing the summary workbook.

use crate::cell::{CellRef, CellValue};
use crate::summary_writer::CellSink;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Spreadsheet, Worksheet};

fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates, durations and error cells are not returns
        other => CellValue::Text(other.to_string()),
    }
}

/// Read a whole worksheet into memory as rows of cells.
///
/// Reads `sheet` when given, otherwise the first sheet. Formula cells yield
/// their cached values. Column indices are absolute (index 0 is column A)
/// even when the sheet's used range starts further right.
pub fn read_sheet_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<CellValue>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let range = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .with_context(|| format!("Sheet '{}' not found in {}", name, path.display()))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| anyhow::anyhow!("Workbook has no sheets: {}", path.display()))?
            .with_context(|| format!("Failed to read first sheet of {}", path.display()))?,
    };

    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); first_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; first_col as usize];
        cells.extend(row.iter().map(to_cell_value));
        rows.push(cells);
    }

    log::info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Summary workbook opened for in-place editing.
pub struct SummaryWorkbook {
    path: PathBuf,
    book: Spreadsheet,
}

impl SummaryWorkbook {
    pub fn open(path: &Path) -> Result<Self> {
        let book = umya_spreadsheet::reader::xlsx::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to open summary workbook {}: {}", path.display(), e))?;
        Ok(Self {
            path: path.to_path_buf(),
            book,
        })
    }

    /// The active sheet, where all summary cells are written.
    pub fn sheet_mut(&mut self) -> &mut Worksheet {
        self.book.get_active_sheet_mut()
    }

    /// Overwrite the workbook at the path it was opened from.
    pub fn save(self) -> Result<PathBuf> {
        umya_spreadsheet::writer::xlsx::write(&self.book, &self.path)
            .map_err(|e| anyhow::anyhow!("Failed to save workbook {}: {}", self.path.display(), e))?;
        Ok(self.path)
    }
}

impl CellSink for Worksheet {
    fn set_number(&mut self, cell: CellRef, value: f64) {
        let coordinate = cell.to_string();
        self.get_cell_mut(coordinate.as_str()).set_value_number(value);
    }

    fn set_text(&mut self, cell: CellRef, value: &str) {
        let coordinate = cell.to_string();
        self.get_cell_mut(coordinate.as_str()).set_value_string(value);
    }
}
