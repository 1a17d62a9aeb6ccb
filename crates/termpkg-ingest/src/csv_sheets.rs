//! Workbooks exported as a directory of `<sheet>.csv` files.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::table::SheetTable;

/// Lists all CSV files in a directory, sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read one CSV file as a sheet named after the file stem.
///
/// Blank records are kept; rows are positional.
pub fn read_csv_sheet(path: &Path) -> Result<SheetTable> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, &e))?;
        raw_rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(sheet = %name, rows = raw_rows.len(), "read CSV sheet");
    Ok(SheetTable::from_rows(name, raw_rows))
}

/// Read every CSV file of a directory as a sheet.
pub(crate) fn read_csv_directory(dir: &Path) -> Result<Vec<SheetTable>> {
    list_csv_files(dir)?
        .iter()
        .map(|path| read_csv_sheet(path.as_path()))
        .collect()
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
