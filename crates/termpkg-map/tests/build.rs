//! Resource building across addressing strategies.

use std::collections::BTreeSet;

use termpkg_ingest::{DomainSheets, SheetTable, Workbook};
use termpkg_map::build_resources;
use termpkg_model::{
    AddressingStrategy, BuildOptions, ConceptMap, ConceptMapScope, Domain, IdentifierStrategy,
    PlacedResource, Resource, SystemUris, SystemsConfig,
};

const LOCAL_URI: &str = "http://node-a.org/codes";

type Row = [&'static str; 9];

fn sheet(domain: Domain, data: &[Row], product: Option<&[[&'static str; 2]]>) -> SheetTable {
    let mut header = vec![
        "#",
        "RACSEL",
        "RACSEL display",
        LOCAL_URI,
        "Local display",
        "CIE",
        "CIE display",
        "SNOMED",
        "SNOMED display",
    ];
    if product.is_some() {
        header.extend(["Product", "Product display"]);
    }
    let mut rows: Vec<Vec<&str>> = vec![header, vec!["note"], vec!["note"]];
    for (index, row) in data.iter().enumerate() {
        let mut cells = row.to_vec();
        if let Some(product) = product {
            cells.extend(product.get(index).copied().unwrap_or(["", ""]));
        }
        rows.push(cells);
    }
    SheetTable::from_rows(domain.sheet_name(), rows)
}

fn workbook(diagnoses: &[Row]) -> Workbook {
    let sheets = Domain::ALL
        .into_iter()
        .map(|domain| {
            let data = if domain == Domain::Diagnoses { diagnoses } else { &[] };
            sheet(domain, data, None)
        })
        .collect();
    Workbook::from_sheets("memory", sheets)
}

fn uris() -> SystemUris {
    SystemsConfig::default().resolve(LOCAL_URI)
}

fn options(addressing: AddressingStrategy) -> BuildOptions {
    BuildOptions {
        addressing,
        identifiers: IdentifierStrategy::Deterministic,
        ..BuildOptions::default()
    }
}

fn build(workbook: &Workbook, options: &BuildOptions) -> Vec<PlacedResource> {
    build_resources(DomainSheets::new(workbook), &uris(), options).expect("build")
}

fn find<'a>(resources: &'a [PlacedResource], name: &str) -> Option<&'a Resource> {
    resources
        .iter()
        .map(|placed| &placed.resource)
        .find(|resource| resource.name() == name)
}

fn concept_map<'a>(resources: &'a [PlacedResource], name: &str) -> &'a ConceptMap {
    match find(resources, name) {
        Some(Resource::ConceptMap(map)) => map,
        other => panic!("no ConceptMap named {name}: {other:?}"),
    }
}

fn codes(resource: Option<&Resource>) -> Vec<String> {
    match resource {
        Some(Resource::ValueSet(vs)) => vs.compose.include[0]
            .concept
            .iter()
            .map(|c| c.code.clone())
            .collect(),
        Some(Resource::CodeSystem(cs)) => cs.concept.iter().map(|c| c.code.clone()).collect(),
        other => panic!("not a catalog: {other:?}"),
    }
}

/// Every system or ValueSet a map names is defined by the same package.
fn assert_references_resolve(resources: &[PlacedResource]) {
    let mut systems = BTreeSet::new();
    let mut value_sets = BTreeSet::new();
    for placed in resources {
        match &placed.resource {
            Resource::CodeSystem(cs) => {
                systems.insert(cs.url.clone());
            }
            Resource::ValueSet(vs) => {
                value_sets.insert(vs.url.clone());
                systems.extend(vs.compose.include.iter().map(|i| i.system.clone()));
            }
            Resource::ConceptMap(_) => {}
        }
    }
    for placed in resources {
        let Resource::ConceptMap(map) = &placed.resource else {
            continue;
        };
        match &map.scope {
            ConceptMapScope::Systems {
                source_uri,
                target_uri,
            } => {
                assert!(systems.contains(source_uri), "{}: {source_uri}", map.name);
                assert!(systems.contains(target_uri), "{}: {target_uri}", map.name);
            }
            ConceptMapScope::ValueSets {
                source_canonical,
                target_canonical,
            } => {
                assert!(value_sets.contains(source_canonical), "{}", map.name);
                assert!(value_sets.contains(target_canonical), "{}", map.name);
            }
        }
        for group in &map.group {
            assert!(systems.contains(&group.source), "{}", map.name);
            assert!(systems.contains(&group.target), "{}", map.name);
        }
    }
}

#[test]
fn single_row_yields_catalogs_and_one_element_map() {
    let book = workbook(&[[
        "1", "R1", "Display1", "L1", "Display1", "", "", "S1", "Display1",
    ]]);
    let resources = build(&book, &options(AddressingStrategy::ValueSet));

    assert_eq!(codes(find(&resources, "SNOMEDValueSet")), vec!["S1"]);
    assert_eq!(codes(find(&resources, "LocalValueSet")), vec!["L1"]);
    assert_eq!(codes(find(&resources, "DiagnosticosLocalValueSet")), vec!["L1"]);
    assert_eq!(codes(find(&resources, "RACSELCodeSystem")), vec!["R1"]);

    let map = concept_map(&resources, "Local to SNOMED");
    assert_eq!(map.group.len(), 1);
    assert_eq!(map.group[0].element.len(), 1);
    assert_eq!(map.group[0].element[0].code, "L1");
    assert_eq!(map.group[0].element[0].target[0].code, "S1");
    assert_eq!(map.url, format!("{LOCAL_URI}/local-to-snomed"));

    let subset = concept_map(&resources, "Diagnosticos Local ValueSet to SNOMED ValueSet");
    assert_eq!(subset.element_count(), 1);
    assert_eq!(
        subset.scope.source(),
        "http://racsel.org/fhir/ValueSet/diagnosticos-local-vs"
    );

    assert_references_resolve(&resources);
}

#[test]
fn header_only_workbook_keeps_every_resource() {
    let book = workbook(&[]);
    let resources = build(&book, &options(AddressingStrategy::ValueSet));

    // 18 per-domain ValueSets, 5 unified, 4 CodeSystems, 12 maps, 24 subset maps.
    assert_eq!(resources.len(), 63);
    for placed in &resources {
        assert_eq!(placed.resource.entry_count(), 0, "{}", placed.path);
        if let Resource::ConceptMap(map) = &placed.resource {
            assert!(map.group.is_empty(), "{}", map.name);
        }
    }
    assert_references_resolve(&resources);
}

#[test]
fn package_order_and_paths() {
    let resources = build(&workbook(&[]), &options(AddressingStrategy::System));
    let paths: Vec<&str> = resources.iter().map(|p| p.path.as_str()).collect();

    assert_eq!(paths.len(), 39);
    assert_eq!(paths[0], "package/ValueSet/AntecedentesPersonalesValueSet.json");
    assert_eq!(paths[1], "package/ValueSet/AntecedentesPersonalesRacselValueSet.json");
    assert_eq!(paths[17], "package/ValueSet/ProcedimientosLocalValueSet.json");
    assert_eq!(
        &paths[18..23],
        [
            "package/ValueSet/RACSELValueSet.json",
            "package/ValueSet/LocalValueSet.json",
            "package/ValueSet/SNOMEDValueSet.json",
            "package/ValueSet/CIE10ValueSet.json",
            "package/ValueSet/CIE11ValueSet.json",
        ]
    );
    assert_eq!(
        &paths[23..27],
        [
            "package/CodeSystem/RACSELCodeSystem.json",
            "package/CodeSystem/icd-10.json",
            "package/CodeSystem/icd-11.json",
            "package/CodeSystem/LocalCodeSystem.json",
        ]
    );
    assert_eq!(paths[27], "package/ConceptMap/Local-to-RACSEL.json");
    assert_eq!(paths[38], "package/ConceptMap/SNOMED-to-CIE11.json");

    let unique: BTreeSet<&str> = paths.iter().copied().collect();
    assert_eq!(unique.len(), paths.len());
}

#[test]
fn missing_direct_rows_are_composed_through_intermediates() {
    let book = workbook(&[
        ["1", "R1", "Reg", "L1", "Loc", "C1", "Cie", "", ""],
        ["2", "R1", "Reg", "", "", "C1", "Cie", "S1", "Snomed"],
    ]);

    let derived = build(&book, &options(AddressingStrategy::System));
    let map = concept_map(&derived, "Local to SNOMED");
    // Reachable through both RACSEL and CIE10; reported once.
    assert_eq!(map.element_count(), 1);
    assert_eq!(map.group[0].element[0].code, "L1");
    assert_eq!(map.group[0].element[0].target[0].code, "S1");

    let direct_only = BuildOptions {
        derive_transitive: false,
        ..options(AddressingStrategy::System)
    };
    let direct = build(&book, &direct_only);
    assert!(concept_map(&direct, "Local to SNOMED").group.is_empty());
}

#[test]
fn direct_rows_suppress_composition_for_their_source() {
    let book = workbook(&[
        ["1", "R1", "Reg", "L1", "Loc", "", "", "S1", "Snomed"],
        ["2", "R1", "Reg", "", "", "", "", "S2", "Snomed 2"],
    ]);
    let resources = build(&book, &options(AddressingStrategy::System));
    let map = concept_map(&resources, "Local to SNOMED");
    let targets: Vec<&str> = map.group[0]
        .element
        .iter()
        .map(|e| e.target[0].code.as_str())
        .collect();
    assert_eq!(targets, vec!["S1"]);
}

#[test]
fn split_by_domain_separates_local_resources() {
    let book = workbook(&[["1", "R1", "Reg", "L1", "Loc", "C1", "Cie", "S1", "Snomed"]]);
    let resources = build(&book, &options(AddressingStrategy::SplitByDomain));

    assert!(find(&resources, "LocalValueSet").is_none());
    assert!(find(&resources, "LocalCodeSystem").is_none());
    assert_eq!(codes(find(&resources, "DiagnosticosLocalCodeSystem")), vec!["L1"]);
    assert!(codes(find(&resources, "AlergiasLocalCodeSystem")).is_empty());

    let map = concept_map(&resources, "Diagnosticos Local to SNOMED");
    assert_eq!(
        map.scope.source(),
        format!("{LOCAL_URI}/diagnosticos").as_str()
    );
    assert_eq!(map.element_count(), 1);

    assert!(find(&resources, "Alergias Local to CIE10").is_none());
    assert!(find(&resources, "Diagnosticos Local to CIE10").is_some());
    assert!(find(&resources, "CIE10 to SNOMED").is_some());
    assert!(find(&resources, "Local to SNOMED").is_none());

    let local_vs = match find(&resources, "DiagnosticosLocalValueSet") {
        Some(Resource::ValueSet(vs)) => vs,
        other => panic!("{other:?}"),
    };
    assert_eq!(local_vs.system(), Some("http://node-a.org/codes/diagnosticos"));

    assert_references_resolve(&resources);
}

#[test]
fn product_columns_add_product_resources() {
    let sheets = Domain::ALL
        .into_iter()
        .map(|domain| {
            if domain == Domain::Immunizations {
                sheet(
                    domain,
                    &[["1", "R9", "Reg", "L9", "Loc", "X9", "Cie11", "S9", "Snomed"]],
                    Some(&[["P9", "Product nine"]]),
                )
            } else {
                sheet(domain, &[], None)
            }
        })
        .collect();
    let book = Workbook::from_sheets("memory", sheets);
    let resources = build(&book, &options(AddressingStrategy::ValueSet));

    assert_eq!(codes(find(&resources, "ProductValueSet")), vec!["P9"]);
    assert_eq!(codes(find(&resources, "ProductCodeSystem")), vec!["P9"]);
    assert_eq!(concept_map(&resources, "Local to Product").element_count(), 1);
    assert_eq!(concept_map(&resources, "Product to Local").element_count(), 1);
    assert_eq!(concept_map(&resources, "Local to CIE11").element_count(), 1);
    assert_references_resolve(&resources);
}

#[test]
fn deterministic_identifiers_make_builds_identical() {
    let book = workbook(&[["1", "R1", "Reg", "L1", "Loc", "C1", "Cie", "S1", "Snomed"]]);
    let first = build(&book, &options(AddressingStrategy::ValueSet));
    let second = build(&book, &options(AddressingStrategy::ValueSet));
    assert_eq!(first, second);

    let random = BuildOptions {
        identifiers: IdentifierStrategy::Random,
        ..options(AddressingStrategy::ValueSet)
    };
    let third = build(&book, &random);
    let paths = |resources: &[PlacedResource]| -> Vec<String> {
        resources.iter().map(|p| p.path.clone()).collect()
    };
    assert_eq!(paths(&first), paths(&third));
    assert_ne!(first[0].resource.id(), third[0].resource.id());
}
