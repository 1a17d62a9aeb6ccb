//! Data model for building FHIR terminology packages from mapping workbooks.
//!
//! The workbook describes, per clinical domain, how local codes line up with a
//! regional code list, a classification (ICD-10 or ICD-11), SNOMED CT and,
//! for immunizations, a product registry. This crate holds the enumerations
//! for those domains and coding systems, the extracted row types, the FHIR
//! resource shapes emitted into the package, and the run configuration.

pub mod code;
pub mod config;
pub mod domain;
pub mod error;
pub mod resource;
pub mod system;

pub use code::{CodeEntry, MappingPair};
pub use config::{
    AddressingStrategy, BuildOptions, IdentifierStrategy, OutputOptions, PackageConfig,
    PackageMetadata, SystemUris, SystemsConfig,
};
pub use domain::{ColumnPair, Domain};
pub use error::ConfigError;
pub use resource::{
    CodeSystem, ConceptMap, ConceptMapElement, ConceptMapGroup, ConceptMapScope, ConceptMapTarget,
    Equivalence, PACKAGE_ROOT, PlacedResource, Resource, ResourceKind, ValueSet, ValueSetCompose,
    ValueSetInclude,
};
pub use system::CodingSystem;
