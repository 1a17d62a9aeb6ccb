//! Mapping synthesis and resource building.
//!
//! Turns extracted code lists and mapping rows into CodeSystem fragments,
//! ValueSets and ConceptMaps. Gaps in direct mappings are filled by joining
//! two mapping tables on a shared intermediate code.

pub mod build;
pub mod catalog;
pub mod compose;
pub mod concept_map;
pub mod error;
pub mod ids;
pub mod plan;

pub use build::{PackageBuilder, build_resources};
pub use catalog::{build_catalog, build_value_set, union_entries};
pub use compose::{compose, fill_gaps};
pub use concept_map::{MapScope, build_mapping_table, slugify};
pub use error::{BuildError, Result};
pub use ids::IdGenerator;
pub use plan::MapPair;
