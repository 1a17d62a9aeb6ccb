//! Conversion pipeline: ingest, build, assemble, write.
//!
//! Each stage runs in its own span and reports its duration on completion.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use termpkg_ingest::{DomainSheets, Workbook, read_workbook, resolve_local_uri};
use termpkg_map::build_resources;
use termpkg_model::{CodingSystem, PackageConfig, PlacedResource, SystemUris};
use termpkg_output::{AssembledPackage, WriteReport, assemble, write_package};

use crate::types::{ConvertResult, ResourceTally};

/// What a run needs beyond its configuration.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub config: PackageConfig,
    /// Build and assemble, skip the archive.
    pub dry_run: bool,
}

/// Output of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    pub workbook: Workbook,
    pub uris: SystemUris,
}

/// Run the whole conversion.
pub fn run_convert(request: &ConvertRequest) -> Result<ConvertResult> {
    let config = &request.config;
    let run_span = info_span!("convert", input = %request.input.display());
    let _run_guard = run_span.enter();

    let ingested = ingest(&request.input, config)?;
    let resources = build(&ingested, config)?;
    let tallies = ResourceTally::collect(&resources);
    let package = assemble_package(resources, config)?;
    let archive = if request.dry_run {
        info!(path = %config.output.path.display(), "dry run, archive not written");
        None
    } else {
        Some(output(&package, &config.output.path)?)
    };

    Ok(ConvertResult {
        input: request.input.clone(),
        local_uri: ingested.uris.uri(CodingSystem::Local).to_string(),
        addressing: config.build.addressing,
        tallies,
        output: config.output.path.clone(),
        archive,
        loader_url: config.output.loader_url.clone(),
    })
}

/// Read the workbook, check its layout and fix the local system URI.
pub fn ingest(input: &Path, config: &PackageConfig) -> Result<IngestResult> {
    let span = info_span!("ingest", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let workbook = read_workbook(input)
        .with_context(|| format!("read workbook {}", input.display()))?;
    DomainSheets::new(&workbook)
        .validate()
        .context("check workbook layout")?;
    let local = resolve_local_uri(
        &workbook,
        config.build.local_uri_column,
        &config.systems.local_default,
    )
    .context("resolve local system URI")?;
    debug!(local_uri = %local, "local system");
    let uris = config.systems.resolve(local);

    info!(
        sheets = workbook.sheet_names().count(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(IngestResult { workbook, uris })
}

/// Build every catalog, subset and mapping table.
pub fn build(ingested: &IngestResult, config: &PackageConfig) -> Result<Vec<PlacedResource>> {
    let span = info_span!("build", addressing = %config.build.addressing);
    let _guard = span.enter();
    let start = Instant::now();

    let resources = build_resources(
        DomainSheets::new(&ingested.workbook),
        &ingested.uris,
        &config.build,
    )
    .context("build resources")?;

    info!(
        resources = resources.len(),
        duration_ms = start.elapsed().as_millis(),
        "build complete"
    );
    Ok(resources)
}

/// Produce the manifest and index and check references.
pub fn assemble_package(
    resources: Vec<PlacedResource>,
    config: &PackageConfig,
) -> Result<AssembledPackage> {
    let span = info_span!("assemble");
    let _guard = span.enter();
    let start = Instant::now();

    let package = assemble(resources, &config.package).context("assemble package")?;

    info!(
        files = package.index.files.len(),
        duration_ms = start.elapsed().as_millis(),
        "assemble complete"
    );
    Ok(package)
}

/// Write the archive.
pub fn output(package: &AssembledPackage, destination: &Path) -> Result<WriteReport> {
    let span = info_span!("write", path = %destination.display());
    let _guard = span.enter();
    let start = Instant::now();

    let report = write_package(package, destination)
        .with_context(|| format!("write package {}", destination.display()))?;

    info!(
        entries = report.entries,
        bytes = report.bytes,
        duration_ms = start.elapsed().as_millis(),
        "write complete"
    );
    Ok(report)
}
