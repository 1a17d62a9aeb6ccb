//! Two-hop composition of mapping tables.

use std::collections::{BTreeMap, BTreeSet};

use termpkg_model::MappingPair;

/// Join `a_to_b` with `b_to_c` on the intermediate code.
///
/// Every pair of rows whose intermediate codes match yields one row, so the
/// result is an inner join: rows of either input without a partner are
/// dropped. Output follows `a_to_b` order, then `b_to_c` order.
///
/// Duplicate rows are kept. [`fill_gaps`] is the caller that deduplicates.
pub fn compose(a_to_b: &[MappingPair], b_to_c: &[MappingPair]) -> Vec<MappingPair> {
    let mut by_intermediate: BTreeMap<&str, Vec<&MappingPair>> = BTreeMap::new();
    for row in b_to_c {
        by_intermediate
            .entry(row.source_code.as_str())
            .or_default()
            .push(row);
    }

    let mut composed = Vec::new();
    for row_ab in a_to_b {
        let Some(matches) = by_intermediate.get(row_ab.target_code.as_str()) else {
            continue;
        };
        for row_bc in matches {
            composed.push(MappingPair::new(
                row_ab.source_code.as_str(),
                row_ab.source_display.as_str(),
                row_bc.target_code.as_str(),
                row_bc.target_display.as_str(),
            ));
        }
    }
    composed
}

/// Append composed rows for source codes that have no direct row.
///
/// Direct rows are returned untouched. Composed rows are deduplicated, since
/// several intermediates can produce the same row.
pub fn fill_gaps(direct: Vec<MappingPair>, composed: &[MappingPair]) -> Vec<MappingPair> {
    let covered: BTreeSet<String> = direct.iter().map(|row| row.source_code.clone()).collect();
    let mut seen: BTreeSet<&MappingPair> = BTreeSet::new();
    let mut rows = direct;
    for row in composed {
        if covered.contains(&row.source_code) || !seen.insert(row) {
            continue;
        }
        rows.push(row.clone());
    }
    rows
}
