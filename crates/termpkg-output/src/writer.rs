//! tar.gz archive output.
//!
//! The archive is written to a temporary file next to the destination and
//! renamed into place once the gzip stream is complete. Any failure drops
//! the temporary file, which deletes it.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use tar::{Builder, Header};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::assemble::AssembledPackage;
use crate::error::{PackageError, Result};
use crate::manifest::{INDEX_PATH, MANIFEST_PATH};

/// Outcome of writing a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub path: PathBuf,
    /// Number of archive entries, manifest and index included.
    pub entries: usize,
    pub bytes: u64,
}

/// Write `package` as a gzip-compressed tar archive at `destination`.
///
/// Entries are the manifest, the index, then every resource in order.
pub fn write_package(package: &AssembledPackage, destination: &Path) -> Result<WriteReport> {
    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let temp = NamedTempFile::new_in(&directory).map_err(|e| PackageError::io(&directory, e))?;
    let temp_path = temp.path().to_path_buf();
    let mtime = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();

    let mut archive = PackageArchive {
        builder: Builder::new(GzEncoder::new(temp, Compression::default())),
        temp_path: temp_path.clone(),
        mtime,
        entries: 0,
    };
    archive.append_json(MANIFEST_PATH, &package.manifest)?;
    archive.append_json(INDEX_PATH, &package.index)?;
    for placed in &package.resources {
        archive.append_json(&placed.path, &placed.resource)?;
    }
    let entries = archive.entries;

    let encoder = archive
        .builder
        .into_inner()
        .map_err(|e| PackageError::io(&temp_path, e))?;
    let mut temp = encoder
        .finish()
        .map_err(|e| PackageError::io(&temp_path, e))?;
    temp.flush().map_err(|e| PackageError::io(&temp_path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| PackageError::io(&temp_path, e))?;

    let file: File = temp
        .persist(destination)
        .map_err(|e| PackageError::io(destination, e.error))?;
    let bytes = file
        .metadata()
        .map_err(|e| PackageError::io(destination, e))?
        .len();

    info!(
        path = %destination.display(),
        entries,
        bytes,
        "wrote package archive"
    );
    Ok(WriteReport {
        path: destination.to_path_buf(),
        entries,
        bytes,
    })
}

struct PackageArchive {
    builder: Builder<GzEncoder<NamedTempFile>>,
    temp_path: PathBuf,
    mtime: u64,
    entries: usize,
}

impl PackageArchive {
    fn append_json<T: Serialize>(&mut self, path: &str, document: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document).map_err(|e| PackageError::Serialize {
            path: path.to_string(),
            source: e,
        })?;
        let mut header = Header::new_gnu();
        header.set_size(bytes.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(self.mtime);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, bytes.as_slice())
            .map_err(|e| PackageError::io(&self.temp_path, e))?;
        self.entries += 1;
        debug!(path, bytes = bytes.len(), "archive entry");
        Ok(())
    }
}
