//! Declarative table of the mapping tables a package carries.
//!
//! Each entry is one directed (source, target) pair of coding systems. The
//! builder walks these tables instead of naming every map by hand.

use termpkg_model::{CodingSystem, Domain};

/// One directed mapping between two coding systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapPair {
    pub source: CodingSystem,
    pub target: CodingSystem,
}

const fn pair(source: CodingSystem, target: CodingSystem) -> MapPair {
    MapPair { source, target }
}

/// System-addressed maps, in package order.
pub const SYSTEM_MAPS: [MapPair; 12] = [
    pair(CodingSystem::Local, CodingSystem::Regional),
    pair(CodingSystem::Local, CodingSystem::Snomed),
    pair(CodingSystem::Local, CodingSystem::Icd10),
    pair(CodingSystem::Local, CodingSystem::Icd11),
    pair(CodingSystem::Icd10, CodingSystem::Snomed),
    pair(CodingSystem::Icd11, CodingSystem::Snomed),
    pair(CodingSystem::Regional, CodingSystem::Local),
    pair(CodingSystem::Icd10, CodingSystem::Local),
    pair(CodingSystem::Icd11, CodingSystem::Local),
    pair(CodingSystem::Snomed, CodingSystem::Local),
    pair(CodingSystem::Snomed, CodingSystem::Icd10),
    pair(CodingSystem::Snomed, CodingSystem::Icd11),
];

/// Maps to and from the product registry, present only with product columns.
pub const PRODUCT_MAPS: [MapPair; 2] = [
    pair(CodingSystem::Local, CodingSystem::Product),
    pair(CodingSystem::Product, CodingSystem::Local),
];

/// Systems with a unified ValueSet, in package order.
pub const UNIFIED_VALUE_SETS: [CodingSystem; 5] = [
    CodingSystem::Regional,
    CodingSystem::Local,
    CodingSystem::Snomed,
    CodingSystem::Icd10,
    CodingSystem::Icd11,
];

/// Systems with a CodeSystem fragment, in package order.
pub const CATALOGS: [CodingSystem; 4] = [
    CodingSystem::Regional,
    CodingSystem::Icd10,
    CodingSystem::Icd11,
    CodingSystem::Local,
];

/// Systems with a per-domain ValueSet, in package order.
pub const DOMAIN_VALUE_SETS: [CodingSystem; 3] = [
    CodingSystem::Snomed,
    CodingSystem::Regional,
    CodingSystem::Local,
];

impl MapPair {
    /// "<A> to <B>".
    pub fn name(self) -> String {
        format!("{} to {}", self.source.label(), self.target.label())
    }

    /// "<Prefix> <A> to <B>", for a map split out per domain.
    pub fn domain_name(self, domain: Domain) -> String {
        format!("{} {}", domain.prefix(), self.name())
    }

    /// "<Prefix> <A> ValueSet to <B> ValueSet", for a subset-addressed map.
    pub fn value_set_name(self, domain: Domain) -> String {
        format!(
            "{} {} ValueSet to {} ValueSet",
            domain.prefix(),
            self.source.label(),
            self.target.label()
        )
    }

    pub fn involves(self, system: CodingSystem) -> bool {
        self.source == system || self.target == system
    }

    /// Whether both ends have a per-domain ValueSet.
    pub fn has_domain_value_sets(self) -> bool {
        self.source.domain_value_set_infix().is_some()
            && self.target.domain_value_set_infix().is_some()
    }
}

/// Directed pairs that get subset-addressed maps per domain.
pub fn value_set_maps() -> impl Iterator<Item = MapPair> {
    SYSTEM_MAPS
        .into_iter()
        .filter(|pair| pair.has_domain_value_sets())
}
