//! Error types for package assembly and output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling or writing a package.
///
/// The consistency errors indicate a defect in the resource set, not in
/// the input workbook, and are always fatal.
#[derive(Debug, Error)]
pub enum PackageError {
    // === Consistency Errors ===
    /// Two resources were assigned the same archive path.
    #[error("duplicate package path: {path}")]
    DuplicatePath { path: String },

    /// A resource lacks a field the manifest or index needs.
    #[error("resource '{resource}' has no '{field}'")]
    MalformedResource { resource: String, field: &'static str },

    /// A resource path is outside the package root.
    #[error("resource path '{path}' is not under {root}")]
    InvalidPath { path: String, root: &'static str },

    /// A ConceptMap names a system or ValueSet the package does not define.
    #[error("ConceptMap '{map}' references '{reference}', which is not in the package")]
    DanglingReference { map: String, reference: String },

    // === Output Errors ===
    /// Failed to serialize a document.
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the archive.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PackageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for package operations.
pub type Result<T> = std::result::Result<T, PackageError>;
