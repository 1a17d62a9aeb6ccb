//! FHIR package assembly and archive output.
//!
//! [`assemble`] lists every resource in a manifest and an index and checks
//! that the set is consistent; [`write_package`] writes the result as a
//! gzip-compressed tar archive.

pub mod assemble;
pub mod error;
pub mod manifest;
pub mod writer;

pub use assemble::{AssembledPackage, assemble, check_references};
pub use error::{PackageError, Result};
pub use manifest::{
    INDEX_PATH, IndexEntry, IndexFile, MANIFEST_PATH, ManifestResource, PackageManifest,
};
pub use writer::{WriteReport, write_package};
