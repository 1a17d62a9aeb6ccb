//! Error types for workbook ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a workbook or extracting from it.
///
/// `MissingSheet` and `MissingColumn` abort the run: no package is written
/// from a workbook that lacks a required sheet or column.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input path does not exist.
    #[error("workbook not found: {path}")]
    WorkbookNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// The spreadsheet reader rejected the file.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// A CSV sheet could not be parsed.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Missing Input ===
    /// A required sheet is absent from the workbook.
    #[error("missing sheet '{sheet}'")]
    MissingSheet { sheet: String },

    /// A required column is absent from a sheet.
    #[error("sheet '{sheet}' has no column {column} (sheet is {width} columns wide)")]
    MissingColumn {
        sheet: String,
        column: usize,
        width: usize,
    },
}

impl IngestError {
    /// True for the missing-input errors that point at the workbook contents.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            IngestError::MissingSheet { .. } | IngestError::MissingColumn { .. }
        )
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
