use termpkg_model::Domain;
use tracing::{info, warn};

use crate::error::Result;
use crate::workbook::Workbook;

/// Resolve the local coding system URI of a run.
///
/// The header cell at `column` of the history sheet names the local system.
/// A missing cell, an empty cell, and a whitespace-only cell are treated the
/// same and select `default`; absent and blank are not told apart.
pub fn resolve_local_uri(workbook: &Workbook, column: usize, default: &str) -> Result<String> {
    let sheet = workbook.sheet(Domain::History.sheet_name())?;
    match sheet.header(column) {
        Some(uri) => {
            info!(uri, column, "local system URI from history header");
            Ok(uri.to_string())
        }
        None => {
            warn!(
                column,
                default, "history header names no local system, using default"
            );
            Ok(default.to_string())
        }
    }
}
