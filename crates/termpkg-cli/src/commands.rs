use anyhow::{Context, Result};
use tracing::debug;

use termpkg_cli::pipeline::{ConvertRequest, run_convert};
use termpkg_cli::types::ConvertResult;
use termpkg_model::PackageConfig;

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<ConvertResult> {
    let mut config = match &cli.config {
        Some(path) => PackageConfig::load(path)
            .with_context(|| format!("load configuration {}", path.display()))?,
        None => PackageConfig::default(),
    };
    cli.apply_overrides(&mut config);
    debug!(
        addressing = %config.build.addressing,
        derive_transitive = config.build.derive_transitive,
        output = %config.output.path.display(),
        "effective configuration"
    );
    run_convert(&ConvertRequest {
        input: cli.input.clone(),
        config,
        dry_run: cli.dry_run,
    })
}
