//! Mapping tables (ConceptMaps).

use termpkg_model::{
    ConceptMap, ConceptMapElement, ConceptMapGroup, ConceptMapScope, ConceptMapTarget,
    Equivalence, MappingPair, ValueSet, resource::STATUS_ACTIVE,
};

use crate::ids::IdGenerator;

/// Source and target addressing of one mapping table.
///
/// Either both ends are coding systems or both are value subsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapScope {
    Systems {
        source: String,
        target: String,
    },
    ValueSets {
        source_url: String,
        source_system: String,
        target_url: String,
        target_system: String,
    },
}

impl MapScope {
    pub fn systems(source: impl Into<String>, target: impl Into<String>) -> Self {
        MapScope::Systems {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Address a table by two ValueSets; groups still name their systems.
    pub fn value_sets(source: &ValueSet, target: &ValueSet) -> Self {
        MapScope::ValueSets {
            source_url: source.url.clone(),
            source_system: source.system().unwrap_or_default().to_string(),
            target_url: target.url.clone(),
            target_system: target.system().unwrap_or_default().to_string(),
        }
    }

    /// Base of the canonical URL: the source system or source ValueSet URL.
    fn base(&self) -> &str {
        match self {
            MapScope::Systems { source, .. } => source,
            MapScope::ValueSets { source_url, .. } => source_url,
        }
    }

    fn group_systems(&self) -> (&str, &str) {
        match self {
            MapScope::Systems { source, target } => (source, target),
            MapScope::ValueSets {
                source_system,
                target_system,
                ..
            } => (source_system, target_system),
        }
    }

    fn to_resource_scope(&self) -> ConceptMapScope {
        match self {
            MapScope::Systems { source, target } => ConceptMapScope::Systems {
                source_uri: source.clone(),
                target_uri: target.clone(),
            },
            MapScope::ValueSets {
                source_url,
                target_url,
                ..
            } => ConceptMapScope::ValueSets {
                source_canonical: source_url.clone(),
                target_canonical: target_url.clone(),
            },
        }
    }
}

/// Lowercase `name` with spaces turned into dashes.
pub fn slugify(name: &str) -> String {
    name.replace(' ', "-").to_lowercase()
}

/// Build a ConceptMap from `pairs`.
///
/// Every pair becomes one element with a single `equivalent` target, all in
/// one group. With no pairs the map has no groups but is still built.
pub fn build_mapping_table(
    pairs: &[MappingPair],
    scope: &MapScope,
    name: &str,
    version: &str,
    ids: &IdGenerator,
) -> ConceptMap {
    let url = format!("{}/{}", scope.base(), slugify(name));
    let mut group = Vec::new();
    if !pairs.is_empty() {
        let (source, target) = scope.group_systems();
        group.push(ConceptMapGroup {
            source: source.to_string(),
            target: target.to_string(),
            element: pairs.iter().map(element).collect(),
        });
    }
    ConceptMap {
        id: ids.id_for(&url),
        url,
        name: name.to_string(),
        version: version.to_string(),
        status: STATUS_ACTIVE.to_string(),
        scope: scope.to_resource_scope(),
        group,
    }
}

fn element(pair: &MappingPair) -> ConceptMapElement {
    ConceptMapElement {
        code: pair.source_code.clone(),
        display: pair.source_display.clone(),
        target: vec![ConceptMapTarget {
            code: pair.target_code.clone(),
            display: pair.target_display.clone(),
            equivalence: Equivalence::Equivalent,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termpkg_model::{CodeEntry, IdentifierStrategy};

    use crate::catalog::build_value_set;

    fn ids() -> IdGenerator {
        IdGenerator::new(IdentifierStrategy::Deterministic)
    }

    #[test]
    fn url_is_source_plus_slug() {
        let scope = MapScope::systems("http://node-a.org/codes", "http://snomed.info/sct");
        let map = build_mapping_table(
            &[MappingPair::new("L1", "Display1", "S1", "Display1")],
            &scope,
            "Local to SNOMED",
            "2024",
            &ids(),
        );
        assert_eq!(map.url, "http://node-a.org/codes/local-to-snomed");
        assert_eq!(map.group.len(), 1);
        assert_eq!(map.group[0].source, "http://node-a.org/codes");
        assert_eq!(map.group[0].target, "http://snomed.info/sct");
        let element = &map.group[0].element[0];
        assert_eq!(element.code, "L1");
        assert_eq!(element.target[0].code, "S1");
        assert_eq!(element.target[0].equivalence, Equivalence::Equivalent);
    }

    #[test]
    fn no_pairs_means_no_groups() {
        let scope = MapScope::systems("http://hl7.org/fhir/sid/icd-10", "http://snomed.info/sct");
        let map = build_mapping_table(&[], &scope, "CIE10 to SNOMED", "2024", &ids());
        assert!(map.group.is_empty());
        assert_eq!(map.name, "CIE10 to SNOMED");
        assert_eq!(map.status, "active");
    }

    #[test]
    fn value_set_scope_uses_canonicals_and_systems() {
        let ids = ids();
        let local = build_value_set(
            "VacunasLocalValueSet",
            "http://racsel.org/fhir/ValueSet/vacunas-local-vs".to_string(),
            vec![CodeEntry::new("L1", "Local")],
            "http://node-a.org/codes",
            &ids,
        );
        let snomed = build_value_set(
            "VacunasValueSet",
            "http://racsel.org/fhir/ValueSet/vacunas-vs".to_string(),
            vec![CodeEntry::new("S1", "Snomed")],
            "http://snomed.info/sct",
            &ids,
        );
        let map = build_mapping_table(
            &[MappingPair::new("L1", "Local", "S1", "Snomed")],
            &MapScope::value_sets(&local, &snomed),
            "Vacunas Local ValueSet to SNOMED ValueSet",
            "2024",
            &ids,
        );
        assert_eq!(
            map.url,
            "http://racsel.org/fhir/ValueSet/vacunas-local-vs/vacunas-local-valueset-to-snomed-valueset"
        );
        assert_eq!(
            map.scope,
            ConceptMapScope::ValueSets {
                source_canonical: "http://racsel.org/fhir/ValueSet/vacunas-local-vs".to_string(),
                target_canonical: "http://racsel.org/fhir/ValueSet/vacunas-vs".to_string(),
            }
        );
        assert_eq!(map.group[0].source, "http://node-a.org/codes");
        assert_eq!(map.group[0].target, "http://snomed.info/sct");
    }
}
