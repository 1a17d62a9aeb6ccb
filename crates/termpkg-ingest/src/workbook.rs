//! The input workbook: named worksheets loaded into memory.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::csv_sheets::read_csv_directory;
use crate::error::{IngestError, Result};
use crate::spreadsheet::read_spreadsheet;
use crate::table::SheetTable;

/// A loaded workbook.
#[derive(Debug, Clone)]
pub struct Workbook {
    source: PathBuf,
    sheets: Vec<SheetTable>,
}

impl Workbook {
    /// Wrap sheets that are already in memory.
    pub fn from_sheets(source: impl Into<PathBuf>, sheets: Vec<SheetTable>) -> Self {
        Self {
            source: source.into(),
            sheets,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str())
    }

    /// Look up a sheet by name.
    ///
    /// Exact names win. Otherwise names are compared trimmed and without
    /// case, since several sheet names carry trailing spaces.
    pub fn sheet(&self, name: &str) -> Result<&SheetTable> {
        if let Some(sheet) = self.sheets.iter().find(|sheet| sheet.name == name) {
            return Ok(sheet);
        }
        let wanted = name.trim().to_lowercase();
        self.sheets
            .iter()
            .find(|sheet| sheet.name.trim().to_lowercase() == wanted)
            .ok_or_else(|| IngestError::MissingSheet {
                sheet: name.to_string(),
            })
    }
}

/// Load a workbook from a spreadsheet file or a directory of CSV sheets.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(IngestError::WorkbookNotFound {
            path: path.to_path_buf(),
        });
    }
    let sheets = if path.is_dir() {
        read_csv_directory(path)?
    } else {
        read_spreadsheet(path)?
    };
    info!(
        path = %path.display(),
        sheets = sheets.len(),
        "loaded workbook"
    );
    Ok(Workbook::from_sheets(path, sheets))
}
