//! `package/package.json` and `package/.index.json` documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use termpkg_model::PackageMetadata;

/// Archive path of the manifest.
pub const MANIFEST_PATH: &str = "package/package.json";
/// Archive path of the index.
pub const INDEX_PATH: &str = "package/.index.json";

/// The package manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(rename = "fhirVersion")]
    pub fhir_version: String,
    pub dependencies: BTreeMap<String, String>,
    pub author: String,
    pub url: String,
    pub resources: Vec<ManifestResource>,
}

impl PackageManifest {
    pub fn new(metadata: &PackageMetadata) -> Self {
        Self {
            name: metadata.name.clone(),
            version: metadata.version.clone(),
            description: metadata.description.clone(),
            fhir_version: metadata.fhir_version.clone(),
            dependencies: BTreeMap::new(),
            author: metadata.author.clone(),
            url: metadata.url.clone(),
            resources: Vec::new(),
        }
    }
}

/// One manifest entry: `{type, reference}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    /// `<ResourceType>/<name>`.
    pub reference: String,
}

/// The package index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFile {
    #[serde(rename = "index-version")]
    pub index_version: u32,
    pub files: Vec<IndexEntry>,
}

impl Default for IndexFile {
    fn default() -> Self {
        Self {
            index_version: 1,
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Path relative to the package root.
    pub filename: String,
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub id: String,
    /// Lower-cased resource type.
    pub kind: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
