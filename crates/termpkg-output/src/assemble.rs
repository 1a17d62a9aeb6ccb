//! Package assembly: manifest, index and consistency checks.

use std::collections::BTreeSet;

use serde_json::Value;
use termpkg_model::{ConceptMapScope, PACKAGE_ROOT, PackageMetadata, PlacedResource, Resource};
use tracing::debug;

use crate::error::{PackageError, Result};
use crate::manifest::{IndexEntry, IndexFile, ManifestResource, PackageManifest};

/// A checked resource set with its manifest and index.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPackage {
    pub resources: Vec<PlacedResource>,
    pub manifest: PackageManifest,
    pub index: IndexFile,
}

/// Assemble `resources` into a package.
///
/// Manifest and index entries follow input order exactly.
pub fn assemble(
    resources: Vec<PlacedResource>,
    metadata: &PackageMetadata,
) -> Result<AssembledPackage> {
    let mut manifest = PackageManifest::new(metadata);
    let mut index = IndexFile::default();
    let mut paths: BTreeSet<&str> = BTreeSet::new();

    for placed in &resources {
        if !paths.insert(placed.path.as_str()) {
            return Err(PackageError::DuplicatePath {
                path: placed.path.clone(),
            });
        }
        let fields = DocumentFields::read(placed)?;
        let filename = placed
            .path
            .strip_prefix(PACKAGE_ROOT)
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| PackageError::InvalidPath {
                path: placed.path.clone(),
                root: PACKAGE_ROOT,
            })?;

        manifest.resources.push(ManifestResource {
            resource_type: fields.resource_type.clone(),
            reference: format!("{}/{}", fields.resource_type, fields.name),
        });
        index.files.push(IndexEntry {
            filename: filename.to_string(),
            kind: fields.resource_type.to_lowercase(),
            resource_type: fields.resource_type,
            id: fields.id,
            url: fields.url,
            version: fields.version,
        });
    }

    check_references(&resources)?;
    debug!(resources = resources.len(), "assembled manifest and index");
    Ok(AssembledPackage {
        resources,
        manifest,
        index,
    })
}

/// Manifest and index fields, read from the serialized document so the
/// listing matches what is written.
struct DocumentFields {
    resource_type: String,
    id: String,
    url: String,
    name: String,
    version: Option<String>,
}

impl DocumentFields {
    fn read(placed: &PlacedResource) -> Result<Self> {
        let document =
            serde_json::to_value(&placed.resource).map_err(|e| PackageError::Serialize {
                path: placed.path.clone(),
                source: e,
            })?;
        let field = |name: &'static str| -> Result<String> {
            document
                .get(name)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or_else(|| PackageError::MalformedResource {
                    resource: placed.path.clone(),
                    field: name,
                })
        };
        Ok(Self {
            resource_type: field("resourceType")?,
            id: field("id")?,
            url: field("url")?,
            name: field("name")?,
            version: document
                .get("version")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Check that every ConceptMap references only systems and ValueSets the
/// package itself defines.
///
/// A system is defined by a CodeSystem `url` or by the `system` of a
/// ValueSet include, which covers reference terminologies published only
/// through ValueSets.
pub fn check_references(resources: &[PlacedResource]) -> Result<()> {
    let mut systems: BTreeSet<&str> = BTreeSet::new();
    let mut value_sets: BTreeSet<&str> = BTreeSet::new();
    for placed in resources {
        match &placed.resource {
            Resource::CodeSystem(cs) => {
                systems.insert(cs.url.as_str());
            }
            Resource::ValueSet(vs) => {
                value_sets.insert(vs.url.as_str());
                systems.extend(vs.compose.include.iter().map(|i| i.system.as_str()));
            }
            Resource::ConceptMap(_) => {}
        }
    }

    for placed in resources {
        let Resource::ConceptMap(map) = &placed.resource else {
            continue;
        };
        let known = match map.scope {
            ConceptMapScope::Systems { .. } => &systems,
            ConceptMapScope::ValueSets { .. } => &value_sets,
        };
        let group_systems = map
            .group
            .iter()
            .flat_map(|group| [group.source.as_str(), group.target.as_str()]);
        let scoped = [map.scope.source(), map.scope.target()];
        for reference in scoped {
            if !known.contains(reference) {
                return Err(dangling(&map.name, reference));
            }
        }
        for reference in group_systems {
            if !systems.contains(reference) {
                return Err(dangling(&map.name, reference));
            }
        }
    }
    Ok(())
}

fn dangling(map: &str, reference: &str) -> PackageError {
    PackageError::DanglingReference {
        map: map.to_string(),
        reference: reference.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termpkg_model::{
        CodeEntry, CodeSystem, ConceptMap, ValueSet, ValueSetCompose, ValueSetInclude,
    };

    fn code_system(name: &str, url: &str) -> CodeSystem {
        CodeSystem {
            id: format!("{name}-id"),
            url: url.to_string(),
            name: name.to_string(),
            version: "2024".to_string(),
            status: "active".to_string(),
            content: "fragment".to_string(),
            concept: vec![CodeEntry::new("A", "Alpha")],
        }
    }

    fn value_set(name: &str, url: &str, system: &str) -> ValueSet {
        ValueSet {
            id: format!("{name}-id"),
            url: url.to_string(),
            name: name.to_string(),
            status: "active".to_string(),
            compose: ValueSetCompose {
                include: vec![ValueSetInclude {
                    system: system.to_string(),
                    concept: Vec::new(),
                }],
            },
        }
    }

    fn concept_map(name: &str, source: &str, target: &str) -> ConceptMap {
        ConceptMap {
            id: format!("{name}-id"),
            url: format!("{source}/{}", name.to_lowercase().replace(' ', "-")),
            name: name.to_string(),
            version: "2024".to_string(),
            status: "active".to_string(),
            scope: ConceptMapScope::Systems {
                source_uri: source.to_string(),
                target_uri: target.to_string(),
            },
            group: Vec::new(),
        }
    }

    #[test]
    fn entries_follow_input_order() {
        let resources = vec![
            PlacedResource::at_default_path(value_set(
                "SNOMEDValueSet",
                "http://example.org/ValueSet/snomed-vs",
                "http://snomed.info/sct",
            )),
            PlacedResource::at_default_path(code_system("LocalCodeSystem", "http://local")),
            PlacedResource::at_default_path(concept_map(
                "Local to SNOMED",
                "http://local",
                "http://snomed.info/sct",
            )),
        ];
        let package = assemble(resources, &PackageMetadata::default()).expect("assemble");

        let references: Vec<&str> = package
            .manifest
            .resources
            .iter()
            .map(|r| r.reference.as_str())
            .collect();
        assert_eq!(
            references,
            vec![
                "ValueSet/SNOMEDValueSet",
                "CodeSystem/LocalCodeSystem",
                "ConceptMap/Local to SNOMED",
            ]
        );
        let files: Vec<&str> = package
            .index
            .files
            .iter()
            .map(|f| f.filename.as_str())
            .collect();
        assert_eq!(
            files,
            vec![
                "ValueSet/SNOMEDValueSet.json",
                "CodeSystem/LocalCodeSystem.json",
                "ConceptMap/Local-to-SNOMED.json",
            ]
        );
        assert_eq!(package.index.files[0].version, None);
        assert_eq!(package.index.files[1].version.as_deref(), Some("2024"));
        assert_eq!(package.index.files[2].kind, "conceptmap");
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let resources = vec![
            PlacedResource::at_default_path(code_system("LocalCodeSystem", "http://a")),
            PlacedResource::at_default_path(code_system("LocalCodeSystem", "http://b")),
        ];
        let error = assemble(resources, &PackageMetadata::default()).unwrap_err();
        assert!(matches!(
            error,
            PackageError::DuplicatePath { ref path } if path == "package/CodeSystem/LocalCodeSystem.json"
        ));
    }

    #[test]
    fn missing_url_is_malformed() {
        let resources = vec![PlacedResource::at_default_path(code_system(
            "LocalCodeSystem",
            "",
        ))];
        let error = assemble(resources, &PackageMetadata::default()).unwrap_err();
        assert!(matches!(
            error,
            PackageError::MalformedResource { field: "url", .. }
        ));
    }

    #[test]
    fn path_outside_package_root_is_rejected() {
        let resources = vec![PlacedResource::new(
            Resource::from(code_system("LocalCodeSystem", "http://a")),
            "CodeSystem/LocalCodeSystem.json",
        )];
        let error = assemble(resources, &PackageMetadata::default()).unwrap_err();
        assert!(matches!(error, PackageError::InvalidPath { .. }));
    }

    #[test]
    fn map_to_unknown_system_dangles() {
        let resources = vec![
            PlacedResource::at_default_path(code_system("LocalCodeSystem", "http://local")),
            PlacedResource::at_default_path(concept_map(
                "Local to CIE10",
                "http://local",
                "http://hl7.org/fhir/sid/icd-10",
            )),
        ];
        let error = check_references(&resources).unwrap_err();
        assert!(matches!(
            error,
            PackageError::DanglingReference { ref reference, .. }
                if reference == "http://hl7.org/fhir/sid/icd-10"
        ));
    }

    #[test]
    fn value_set_include_defines_a_system() {
        let resources = vec![
            PlacedResource::at_default_path(code_system("LocalCodeSystem", "http://local")),
            PlacedResource::at_default_path(value_set(
                "SNOMEDValueSet",
                "http://example.org/ValueSet/snomed-vs",
                "http://snomed.info/sct",
            )),
            PlacedResource::at_default_path(concept_map(
                "SNOMED to Local",
                "http://snomed.info/sct",
                "http://local",
            )),
        ];
        assert!(check_references(&resources).is_ok());
    }
}
