//! Workbook ingestion for terminology packages.
//!
//! A workbook is either a spreadsheet file or a directory of CSV sheets.
//! Sheets are kept as positional text tables; extraction pulls code lists
//! and mapping rows out of fixed column pairs.

pub mod csv_sheets;
pub mod error;
pub mod extract;
pub mod local_uri;
mod spreadsheet;
pub mod table;
pub mod workbook;

pub use csv_sheets::{list_csv_files, read_csv_sheet};
pub use error::{IngestError, Result};
pub use extract::{DomainSheets, SKIPPED_ROWS, extract_codes, extract_mappings};
pub use local_uri::resolve_local_uri;
pub use table::SheetTable;
pub use workbook::{Workbook, read_workbook};
