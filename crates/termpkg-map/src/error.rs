//! Error types for building package resources.

use termpkg_ingest::IngestError;
use thiserror::Error;

/// Errors from building the resource set.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Extraction from the workbook failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;
