//! FHIR R4 terminology resources emitted into the package.
//!
//! Only the elements this package produces are modelled. Field order matches
//! the JSON documents written into the archive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CodeEntry;

/// Status stamped on every generated resource.
pub const STATUS_ACTIVE: &str = "active";

/// `CodeSystem.content` of the published catalogs.
pub const CONTENT_FRAGMENT: &str = "fragment";

/// Kind of a generated resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    CodeSystem,
    ValueSet,
    ConceptMap,
}

impl ResourceKind {
    /// The FHIR `resourceType` value.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::CodeSystem => "CodeSystem",
            ResourceKind::ValueSet => "ValueSet",
            ResourceKind::ConceptMap => "ConceptMap",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A code catalog: a fragment of one coding system's concepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSystem {
    pub id: String,
    pub url: String,
    pub name: String,
    pub version: String,
    pub status: String,
    pub content: String,
    pub concept: Vec<CodeEntry>,
}

/// A value subset: an explicit selection of codes from one coding system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSet {
    pub id: String,
    pub url: String,
    pub name: String,
    pub status: String,
    pub compose: ValueSetCompose,
}

impl ValueSet {
    /// Coding system of the first include, which is the only one generated.
    pub fn system(&self) -> Option<&str> {
        self.compose
            .include
            .first()
            .map(|include| include.system.as_str())
    }

    /// Number of concepts across all includes.
    pub fn concept_count(&self) -> usize {
        self.compose
            .include
            .iter()
            .map(|include| include.concept.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSetCompose {
    pub include: Vec<ValueSetInclude>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSetInclude {
    pub system: String,
    pub concept: Vec<CodeEntry>,
}

/// How a ConceptMap addresses its source and target.
///
/// A map is either addressed by coding system URIs or by ValueSet canonical
/// URLs, never a mix of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConceptMapScope {
    Systems {
        #[serde(rename = "sourceUri")]
        source_uri: String,
        #[serde(rename = "targetUri")]
        target_uri: String,
    },
    ValueSets {
        #[serde(rename = "sourceCanonical")]
        source_canonical: String,
        #[serde(rename = "targetCanonical")]
        target_canonical: String,
    },
}

impl ConceptMapScope {
    pub fn source(&self) -> &str {
        match self {
            ConceptMapScope::Systems { source_uri, .. } => source_uri,
            ConceptMapScope::ValueSets {
                source_canonical, ..
            } => source_canonical,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            ConceptMapScope::Systems { target_uri, .. } => target_uri,
            ConceptMapScope::ValueSets {
                target_canonical, ..
            } => target_canonical,
        }
    }
}

/// A mapping table between two coding systems or two value subsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptMap {
    pub id: String,
    pub url: String,
    pub name: String,
    pub version: String,
    pub status: String,
    #[serde(flatten)]
    pub scope: ConceptMapScope,
    pub group: Vec<ConceptMapGroup>,
}

impl ConceptMap {
    /// Number of mapped source elements across all groups.
    pub fn element_count(&self) -> usize {
        self.group.iter().map(|group| group.element.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptMapGroup {
    pub source: String,
    pub target: String,
    pub element: Vec<ConceptMapElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptMapElement {
    pub code: String,
    pub display: String,
    pub target: Vec<ConceptMapTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptMapTarget {
    pub code: String,
    pub display: String,
    pub equivalence: Equivalence,
}

/// Relationship between a source and a target concept.
///
/// Partial relationships (wider, narrower, ...) are not produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equivalence {
    Equivalent,
}

/// Any resource that goes into the package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    CodeSystem(CodeSystem),
    ValueSet(ValueSet),
    ConceptMap(ConceptMap),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::CodeSystem(_) => ResourceKind::CodeSystem,
            Resource::ValueSet(_) => ResourceKind::ValueSet,
            Resource::ConceptMap(_) => ResourceKind::ConceptMap,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Resource::CodeSystem(cs) => &cs.id,
            Resource::ValueSet(vs) => &vs.id,
            Resource::ConceptMap(cm) => &cm.id,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Resource::CodeSystem(cs) => &cs.url,
            Resource::ValueSet(vs) => &vs.url,
            Resource::ConceptMap(cm) => &cm.url,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::CodeSystem(cs) => &cs.name,
            Resource::ValueSet(vs) => &vs.name,
            Resource::ConceptMap(cm) => &cm.name,
        }
    }

    /// Business version, absent on ValueSets.
    pub fn version(&self) -> Option<&str> {
        match self {
            Resource::CodeSystem(cs) => Some(&cs.version),
            Resource::ValueSet(_) => None,
            Resource::ConceptMap(cm) => Some(&cm.version),
        }
    }

    /// Number of concepts (catalogs, subsets) or mapped elements (maps).
    pub fn entry_count(&self) -> usize {
        match self {
            Resource::CodeSystem(cs) => cs.concept.len(),
            Resource::ValueSet(vs) => vs.concept_count(),
            Resource::ConceptMap(cm) => cm.element_count(),
        }
    }
}

impl From<CodeSystem> for Resource {
    fn from(value: CodeSystem) -> Self {
        Resource::CodeSystem(value)
    }
}

impl From<ValueSet> for Resource {
    fn from(value: ValueSet) -> Self {
        Resource::ValueSet(value)
    }
}

impl From<ConceptMap> for Resource {
    fn from(value: ConceptMap) -> Self {
        Resource::ConceptMap(value)
    }
}

/// Root directory of every file inside the package archive.
pub const PACKAGE_ROOT: &str = "package/";

/// A resource together with its path inside the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedResource {
    pub resource: Resource,
    pub path: String,
}

impl PlacedResource {
    pub fn new(resource: Resource, path: impl Into<String>) -> Self {
        Self {
            resource,
            path: path.into(),
        }
    }

    /// Place a resource at `package/<ResourceType>/<name>.json`, with spaces
    /// in the name replaced by dashes.
    pub fn at_default_path(resource: impl Into<Resource>) -> Self {
        let resource = resource.into();
        let path = format!(
            "{PACKAGE_ROOT}{}/{}.json",
            resource.kind(),
            resource.name().replace(' ', "-")
        );
        Self { resource, path }
    }
}
