//! Run configuration for a package build.
//!
//! Every value here used to be a process-wide constant. It is now threaded
//! through the pipeline explicitly so separate runs (and tests) can use
//! separate coding system URIs.
//!
//! A configuration can be loaded from TOML; missing sections and keys fall
//! back to the defaults below.
//!
//! ```toml
//! [systems]
//! regional = "http://racsel.org/connectathon"
//!
//! [build]
//! addressing = "split-by-domain"
//! identifiers = "deterministic"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CodingSystem, ConfigError, Domain};

/// Complete configuration of a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    pub package: PackageMetadata,
    pub systems: SystemsConfig,
    pub build: BuildOptions,
    pub output: OutputOptions,
}

impl PackageConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Toml {
            path: origin.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&contents, path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("package.name", &self.package.name),
            ("package.version", &self.package.version),
            ("systems.regional", &self.systems.regional),
            ("systems.local_default", &self.systems.local_default),
            ("systems.icd10", &self.systems.icd10),
            ("systems.icd11", &self.systems.icd11),
            ("systems.snomed", &self.systems.snomed),
            ("systems.product", &self.systems.product),
            ("systems.value_set_base", &self.systems.value_set_base),
            ("build.resource_version", &self.build.resource_version),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("{key} must not be empty"),
                });
            }
        }
        Ok(())
    }
}

/// Metadata written to `package/package.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub fhir_version: String,
    pub author: String,
    pub url: String,
}

impl Default for PackageMetadata {
    fn default() -> Self {
        Self {
            name: "racsel.connectathon".to_string(),
            version: "1.0.0".to_string(),
            description: "RACSEL Connectathon FHIR Package".to_string(),
            fhir_version: "4.0.1".to_string(),
            author: "RACSEL".to_string(),
            url: "http://racsel.org".to_string(),
        }
    }
}

/// Coding system URIs and the ValueSet namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemsConfig {
    pub regional: String,
    /// Local system URI used when the workbook does not name one.
    pub local_default: String,
    pub icd10: String,
    pub icd11: String,
    pub snomed: String,
    pub product: String,
    /// Prefix of every ValueSet canonical URL; the short id is appended.
    pub value_set_base: String,
}

impl Default for SystemsConfig {
    fn default() -> Self {
        Self {
            regional: "http://racsel.org/connectathon".to_string(),
            local_default: "http://node-x.org/terminology/default".to_string(),
            icd10: "http://hl7.org/fhir/sid/icd-10".to_string(),
            icd11: "http://id.who.int/icd/release/11/mms".to_string(),
            snomed: "http://snomed.info/sct".to_string(),
            product: "http://racsel.org/connectathon/product-registry".to_string(),
            value_set_base: "http://racsel.org/fhir/ValueSet/".to_string(),
        }
    }
}

impl SystemsConfig {
    /// Fix the local system URI for a run.
    pub fn resolve(&self, local: impl Into<String>) -> SystemUris {
        SystemUris {
            local: local.into(),
            regional: self.regional.clone(),
            icd10: self.icd10.clone(),
            icd11: self.icd11.clone(),
            snomed: self.snomed.clone(),
            product: self.product.clone(),
            value_set_base: self.value_set_base.clone(),
        }
    }
}

/// Coding system URIs fixed for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemUris {
    local: String,
    regional: String,
    icd10: String,
    icd11: String,
    snomed: String,
    product: String,
    value_set_base: String,
}

impl SystemUris {
    /// URI of `system` across the whole package.
    pub fn uri(&self, system: CodingSystem) -> &str {
        match system {
            CodingSystem::Local => &self.local,
            CodingSystem::Regional => &self.regional,
            CodingSystem::Icd10 => &self.icd10,
            CodingSystem::Icd11 => &self.icd11,
            CodingSystem::Snomed => &self.snomed,
            CodingSystem::Product => &self.product,
        }
    }

    /// URI of the local system split out for one domain.
    pub fn split_local_uri(&self, domain: Domain) -> String {
        format!("{}/{}", self.local.trim_end_matches('/'), domain.slug())
    }

    /// Canonical URL of a ValueSet with the given short identifier.
    pub fn value_set_url(&self, short_id: &str) -> String {
        format!("{}{short_id}", self.value_set_base)
    }
}

/// How catalogs and mapping tables are addressed in the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressingStrategy {
    /// Unified catalogs, system-addressed mapping tables.
    System,
    /// Local catalogs and local mapping tables split per domain.
    SplitByDomain,
    /// Unified catalogs plus per-domain ValueSet-addressed mapping tables.
    #[default]
    ValueSet,
}

impl AddressingStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            AddressingStrategy::System => "system",
            AddressingStrategy::SplitByDomain => "split-by-domain",
            AddressingStrategy::ValueSet => "value-set",
        }
    }
}

impl fmt::Display for AddressingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(AddressingStrategy::System),
            "split-by-domain" | "split" => Ok(AddressingStrategy::SplitByDomain),
            "value-set" | "valueset" => Ok(AddressingStrategy::ValueSet),
            _ => Err(format!("Unknown addressing strategy: {s}")),
        }
    }
}

/// How resource `id` values are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierStrategy {
    /// A fresh random UUID per resource and run.
    #[default]
    Random,
    /// A name-based UUID derived from the canonical URL.
    Deterministic,
}

/// Options controlling which resources are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub addressing: AddressingStrategy,
    /// Fill gaps in direct mappings with two-hop compositions.
    pub derive_transitive: bool,
    pub identifiers: IdentifierStrategy,
    /// Business version stamped on catalogs and mapping tables.
    pub resource_version: String,
    /// Header cell of the history sheet that names the local system URI.
    pub local_uri_column: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            addressing: AddressingStrategy::default(),
            derive_transitive: true,
            identifiers: IdentifierStrategy::default(),
            resource_version: "2024".to_string(),
            local_uri_column: 3,
        }
    }
}

/// Where the archive goes and how it is loaded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub path: PathBuf,
    /// Terminology server endpoint suggested in the follow-up command.
    pub loader_url: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("racsel_fhir_package.tgz"),
            loader_url: "http://localhost/fhir-admin/load-package".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = PackageConfig::from_toml_str("", Path::new("empty.toml")).expect("parse");
        assert_eq!(config, PackageConfig::default());
        assert_eq!(config.build.addressing, AddressingStrategy::ValueSet);
        assert!(config.build.derive_transitive);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let toml = r#"
            [systems]
            regional = "http://example.org/regional"

            [build]
            addressing = "split-by-domain"
            identifiers = "deterministic"
        "#;
        let config = PackageConfig::from_toml_str(toml, Path::new("run.toml")).expect("parse");
        assert_eq!(config.systems.regional, "http://example.org/regional");
        assert_eq!(config.systems.snomed, "http://snomed.info/sct");
        assert_eq!(config.build.addressing, AddressingStrategy::SplitByDomain);
        assert_eq!(config.build.identifiers, IdentifierStrategy::Deterministic);
        assert_eq!(config.build.resource_version, "2024");
    }

    #[test]
    fn empty_uri_is_rejected() {
        let toml = "[systems]\nsnomed = \"  \"\n";
        let error = PackageConfig::from_toml_str(toml, Path::new("bad.toml")).unwrap_err();
        assert!(error.to_string().contains("systems.snomed"));
    }

    #[test]
    fn unknown_strategy_is_a_toml_error() {
        let toml = "[build]\naddressing = \"per-sheet\"\n";
        let error = PackageConfig::from_toml_str(toml, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(error, ConfigError::Toml { .. }));
    }

    #[test]
    fn local_uri_column_can_be_moved() {
        let toml = "[build]\nlocal_uri_column = 2\n";
        let config = PackageConfig::from_toml_str(toml, Path::new("run.toml")).expect("parse");
        assert_eq!(config.build.local_uri_column, 2);
        assert_eq!(BuildOptions::default().local_uri_column, 3);
    }

    #[test]
    fn resolved_uris() {
        let uris = SystemsConfig::default().resolve("http://node-a.org/codes/");
        assert_eq!(uris.uri(CodingSystem::Local), "http://node-a.org/codes/");
        assert_eq!(
            uris.split_local_uri(Domain::Allergies),
            "http://node-a.org/codes/alergias"
        );
        assert_eq!(
            uris.value_set_url("local-vs"),
            "http://racsel.org/fhir/ValueSet/local-vs"
        );
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("termpkg.toml");
        std::fs::write(&path, "[package]\nname = \"node.a\"\n").expect("write");
        let config = PackageConfig::load(&path).expect("load");
        assert_eq!(config.package.name, "node.a");

        let missing = PackageConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
