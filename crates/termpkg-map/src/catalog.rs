//! Code catalogs (CodeSystem fragments) and value subsets (ValueSets).

use std::collections::BTreeSet;

use termpkg_model::{
    CodeEntry, CodeSystem, ValueSet, ValueSetCompose, ValueSetInclude,
    resource::{CONTENT_FRAGMENT, STATUS_ACTIVE},
};

use crate::ids::IdGenerator;

/// Concatenate entry lists in order, keeping the first of any repeated
/// (code, display) entry.
pub fn union_entries<'a, I>(entry_lists: I) -> Vec<CodeEntry>
where
    I: IntoIterator<Item = &'a [CodeEntry]>,
{
    let mut seen: BTreeSet<&CodeEntry> = BTreeSet::new();
    let mut entries = Vec::new();
    for list in entry_lists {
        for entry in list {
            if seen.insert(entry) {
                entries.push(entry.clone());
            }
        }
    }
    entries
}

/// Build a CodeSystem fragment over `system_uri` from per-domain lists.
pub fn build_catalog<'a, I>(
    entry_lists: I,
    system_uri: &str,
    name: &str,
    version: &str,
    ids: &IdGenerator,
) -> CodeSystem
where
    I: IntoIterator<Item = &'a [CodeEntry]>,
{
    CodeSystem {
        id: ids.id_for(system_uri),
        url: system_uri.to_string(),
        name: name.to_string(),
        version: version.to_string(),
        status: STATUS_ACTIVE.to_string(),
        content: CONTENT_FRAGMENT.to_string(),
        concept: union_entries(entry_lists),
    }
}

/// Build a ValueSet including `entries` from the single system `system_uri`.
///
/// `url` is the canonical URL, the namespace prefix followed by the short id.
pub fn build_value_set(
    name: &str,
    url: String,
    entries: Vec<CodeEntry>,
    system_uri: &str,
    ids: &IdGenerator,
) -> ValueSet {
    ValueSet {
        id: ids.id_for(&url),
        url,
        name: name.to_string(),
        status: STATUS_ACTIVE.to_string(),
        compose: ValueSetCompose {
            include: vec![ValueSetInclude {
                system: system_uri.to_string(),
                concept: entries,
            }],
        },
    }
}
