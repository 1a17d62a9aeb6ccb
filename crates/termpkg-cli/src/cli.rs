//! CLI argument definitions for the terminology package converter.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use termpkg_model::{AddressingStrategy, IdentifierStrategy, PackageConfig};

#[derive(Parser)]
#[command(
    name = "termpkg",
    version,
    about = "Convert a terminology mapping workbook into a FHIR package",
    long_about = "Convert a terminology mapping workbook into a FHIR R4 package.\n\n\
                  Reads one sheet per clinical domain (spreadsheet or a directory of CSV\n\
                  sheets) and writes CodeSystem fragments, ValueSets and ConceptMaps\n\
                  into a .tgz archive ready to load into a terminology server."
)]
pub struct Cli {
    /// Mapping workbook (.xlsx, .xlsm, .xls, .ods) or a directory of CSV sheets.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Archive to write (default: racsel_fhir_package.tgz).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML configuration with package metadata, system URIs and build options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// How catalogs and mapping tables are addressed.
    #[arg(long = "addressing", value_enum)]
    pub addressing: Option<AddressingArg>,

    /// Only emit mappings listed in the workbook; skip two-hop synthesis.
    #[arg(long = "no-transitive")]
    pub no_transitive: bool,

    /// Derive resource ids from canonical URLs instead of random UUIDs.
    #[arg(long = "deterministic-ids")]
    pub deterministic_ids: bool,

    /// Build and check the package without writing the archive.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut PackageConfig) {
        if let Some(path) = &self.output {
            config.output.path.clone_from(path);
        }
        if let Some(addressing) = self.addressing {
            config.build.addressing = addressing.into();
        }
        if self.no_transitive {
            config.build.derive_transitive = false;
        }
        if self.deterministic_ids {
            config.build.identifiers = IdentifierStrategy::Deterministic;
        }
    }
}

/// CLI addressing choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum AddressingArg {
    System,
    SplitByDomain,
    ValueSet,
}

impl From<AddressingArg> for AddressingStrategy {
    fn from(value: AddressingArg) -> Self {
        match value {
            AddressingArg::System => AddressingStrategy::System,
            AddressingArg::SplitByDomain => AddressingStrategy::SplitByDomain,
            AddressingArg::ValueSet => AddressingStrategy::ValueSet,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
