//! Builds the full resource set of a package from a workbook.
//!
//! The addressing strategy decides which catalogs and maps exist; the rows
//! inside them always come from the same extraction and synthesis steps.
//!
//! Package order is: per-domain ValueSets, unified ValueSets, CodeSystems,
//! system-addressed ConceptMaps, then ValueSet-addressed ConceptMaps.

use termpkg_ingest::DomainSheets;
use termpkg_model::{
    AddressingStrategy, BuildOptions, CodeEntry, CodingSystem, Domain, MappingPair,
    PlacedResource, SystemUris, ValueSet,
};
use tracing::{debug, trace};

use crate::catalog::{build_catalog, build_value_set, union_entries};
use crate::compose::{compose, fill_gaps};
use crate::concept_map::{MapScope, build_mapping_table};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::plan::{
    CATALOGS, DOMAIN_VALUE_SETS, MapPair, PRODUCT_MAPS, SYSTEM_MAPS, UNIFIED_VALUE_SETS,
    value_set_maps,
};

/// Code lists of every (domain, coding system) the workbook carries.
struct DomainCodes {
    entries: Vec<(Domain, CodingSystem, Vec<CodeEntry>)>,
}

impl DomainCodes {
    fn extract(sheets: &DomainSheets<'_>) -> Result<Self> {
        let mut entries = Vec::new();
        for domain in Domain::ALL {
            for system in domain.systems() {
                if domain.is_optional(system) && !sheets.has_columns(domain, system)? {
                    continue;
                }
                let codes = sheets.codes(domain, system)?;
                debug!(%domain, %system, codes = codes.len(), "domain codes");
                entries.push((domain, system, codes));
            }
        }
        Ok(Self { entries })
    }

    fn get(&self, domain: Domain, system: CodingSystem) -> &[CodeEntry] {
        self.entries
            .iter()
            .find(|(d, s, _)| *d == domain && *s == system)
            .map(|(_, _, codes)| codes.as_slice())
            .unwrap_or_default()
    }

    /// Per-domain lists of `system`, in domain order.
    fn lists(&self, system: CodingSystem) -> impl Iterator<Item = &[CodeEntry]> {
        self.entries
            .iter()
            .filter(move |(_, s, _)| *s == system)
            .map(|(_, _, codes)| codes.as_slice())
    }

    fn has_system(&self, system: CodingSystem) -> bool {
        self.entries.iter().any(|(_, s, _)| *s == system)
    }

    fn carries(&self, domain: Domain, system: CodingSystem) -> bool {
        self.entries
            .iter()
            .any(|(d, s, _)| *d == domain && *s == system)
    }
}

/// Builds every resource of one package.
pub struct PackageBuilder<'a> {
    sheets: DomainSheets<'a>,
    uris: &'a SystemUris,
    options: &'a BuildOptions,
    ids: IdGenerator,
}

impl<'a> PackageBuilder<'a> {
    pub fn new(sheets: DomainSheets<'a>, uris: &'a SystemUris, options: &'a BuildOptions) -> Self {
        Self {
            sheets,
            uris,
            options,
            ids: IdGenerator::new(options.identifiers),
        }
    }

    fn split(&self) -> bool {
        self.options.addressing == AddressingStrategy::SplitByDomain
    }

    /// URI of `system`; the local system is split per domain when asked.
    fn system_uri(&self, system: CodingSystem, domain: Option<Domain>) -> String {
        match (system, domain) {
            (CodingSystem::Local, Some(domain)) if self.split() => {
                self.uris.split_local_uri(domain)
            }
            _ => self.uris.uri(system).to_string(),
        }
    }

    /// Build the ordered resource list.
    pub fn build(&self) -> Result<Vec<PlacedResource>> {
        let codes = DomainCodes::extract(&self.sheets)?;
        let product = codes.has_system(CodingSystem::Product);
        let version = self.options.resource_version.as_str();
        let mut placed = Vec::new();

        let domain_value_sets = self.domain_value_sets(&codes);
        placed.extend(
            domain_value_sets
                .iter()
                .map(|(_, _, vs)| PlacedResource::at_default_path(vs.clone())),
        );

        for system in UNIFIED_VALUE_SETS
            .into_iter()
            .chain(product.then_some(CodingSystem::Product))
        {
            if system == CodingSystem::Local && self.split() {
                continue;
            }
            let vs = build_value_set(
                &system.value_set_name(),
                self.uris.value_set_url(&system.value_set_id()),
                union_entries(codes.lists(system)),
                self.uris.uri(system),
                &self.ids,
            );
            placed.push(PlacedResource::at_default_path(vs));
        }

        for system in CATALOGS
            .into_iter()
            .chain(product.then_some(CodingSystem::Product))
        {
            let Some(name) = system.code_system_name() else {
                continue;
            };
            if system == CodingSystem::Local && self.split() {
                for domain in Domain::ALL {
                    let catalog = build_catalog(
                        [codes.get(domain, system)],
                        &self.system_uri(system, Some(domain)),
                        &format!("{}{name}", domain.prefix()),
                        version,
                        &self.ids,
                    );
                    placed.push(PlacedResource::at_default_path(catalog));
                }
            } else {
                let catalog = build_catalog(
                    codes.lists(system),
                    self.uris.uri(system),
                    name,
                    version,
                    &self.ids,
                );
                placed.push(PlacedResource::at_default_path(catalog));
            }
        }

        let pairs: Vec<MapPair> = SYSTEM_MAPS
            .into_iter()
            .chain(PRODUCT_MAPS.into_iter().filter(|_| product))
            .collect();
        for pair in pairs {
            if self.split() && pair.involves(CodingSystem::Local) {
                for domain in Domain::ALL {
                    if !(codes.carries(domain, pair.source) && codes.carries(domain, pair.target)) {
                        continue;
                    }
                    let rows = self.domain_rows(domain, pair)?;
                    let scope = MapScope::systems(
                        self.system_uri(pair.source, Some(domain)),
                        self.system_uri(pair.target, Some(domain)),
                    );
                    let map = build_mapping_table(
                        &rows,
                        &scope,
                        &pair.domain_name(domain),
                        version,
                        &self.ids,
                    );
                    placed.push(PlacedResource::at_default_path(map));
                }
            } else {
                let mut rows = Vec::new();
                for domain in Domain::ALL {
                    rows.extend(self.domain_rows(domain, pair)?);
                }
                let scope = MapScope::systems(
                    self.system_uri(pair.source, None),
                    self.system_uri(pair.target, None),
                );
                let map = build_mapping_table(&rows, &scope, &pair.name(), version, &self.ids);
                placed.push(PlacedResource::at_default_path(map));
            }
        }

        if self.options.addressing == AddressingStrategy::ValueSet {
            for domain in Domain::ALL {
                for pair in value_set_maps() {
                    let (Some(source), Some(target)) = (
                        find_value_set(&domain_value_sets, domain, pair.source),
                        find_value_set(&domain_value_sets, domain, pair.target),
                    ) else {
                        continue;
                    };
                    let rows = self.domain_rows(domain, pair)?;
                    let map = build_mapping_table(
                        &rows,
                        &MapScope::value_sets(source, target),
                        &pair.value_set_name(domain),
                        version,
                        &self.ids,
                    );
                    placed.push(PlacedResource::at_default_path(map));
                }
            }
        }

        debug!(
            resources = placed.len(),
            addressing = %self.options.addressing,
            "built resources"
        );
        Ok(placed)
    }

    fn domain_value_sets(&self, codes: &DomainCodes) -> Vec<(Domain, CodingSystem, ValueSet)> {
        let mut value_sets = Vec::new();
        for domain in Domain::ALL {
            for system in DOMAIN_VALUE_SETS {
                let (Some(name), Some(id)) =
                    (domain.value_set_name(system), domain.value_set_id(system))
                else {
                    continue;
                };
                let vs = build_value_set(
                    &name,
                    self.uris.value_set_url(&id),
                    codes.get(domain, system).to_vec(),
                    &self.system_uri(system, Some(domain)),
                    &self.ids,
                );
                value_sets.push((domain, system, vs));
            }
        }
        value_sets
    }

    /// Mapping rows of `pair` in `domain`: the direct rows, plus composed
    /// rows for source codes the direct rows leave unmapped.
    pub fn domain_rows(&self, domain: Domain, pair: MapPair) -> Result<Vec<MappingPair>> {
        let direct = self.sheets.mappings(domain, pair.source, pair.target)?;
        if !self.options.derive_transitive {
            return Ok(direct);
        }
        let mut composed = Vec::new();
        for via in domain.systems() {
            if via == pair.source || via == pair.target || !self.sheets.has_columns(domain, via)? {
                continue;
            }
            let first = self.sheets.mappings(domain, pair.source, via)?;
            let second = self.sheets.mappings(domain, via, pair.target)?;
            composed.extend(compose(&first, &second));
        }
        let direct_count = direct.len();
        let rows = fill_gaps(direct, &composed);
        if rows.len() > direct_count {
            trace!(
                %domain,
                map = %pair.name(),
                derived = rows.len() - direct_count,
                "transitive rows"
            );
        }
        Ok(rows)
    }
}

fn find_value_set(
    value_sets: &[(Domain, CodingSystem, ValueSet)],
    domain: Domain,
    system: CodingSystem,
) -> Option<&ValueSet> {
    value_sets
        .iter()
        .find(|(d, s, _)| *d == domain && *s == system)
        .map(|(_, _, vs)| vs)
}

/// Build the resources of a package with the given options.
pub fn build_resources(
    sheets: DomainSheets<'_>,
    uris: &SystemUris,
    options: &BuildOptions,
) -> Result<Vec<PlacedResource>> {
    PackageBuilder::new(sheets, uris, options).build()
}
