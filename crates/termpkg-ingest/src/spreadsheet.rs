//! Spreadsheet files (xlsx, xlsm, xls, ods) read through calamine.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::table::SheetTable;

/// Read every worksheet of a spreadsheet file.
pub(crate) fn read_spreadsheet(path: &Path) -> Result<Vec<SheetTable>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| IngestError::Workbook {
                path: path.to_path_buf(),
                message: format!("sheet '{name}': {e}"),
            })?;
        let rows = range_rows(&range);
        debug!(sheet = %name, rows = rows.len(), "read worksheet");
        sheets.push(SheetTable::from_rows(name, rows));
    }
    Ok(sheets)
}

/// Cell text of a range, anchored at A1.
///
/// calamine ranges start at the first used cell, so leading blank rows and
/// columns are restored to keep positional column indices stable.
fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let mut rows: Vec<Vec<String>> = (0..start_row).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }
    rows
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_numeric(*value),
        Data::Bool(value) => value.to_string(),
        other => other.to_string(),
    }
}

/// Text of a numeric cell; integral values drop the fractional part.
pub(crate) fn format_numeric(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
