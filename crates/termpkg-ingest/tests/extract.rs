//! Property tests for code and mapping extraction.

use std::collections::HashSet;

use proptest::prelude::*;
use termpkg_ingest::{SKIPPED_ROWS, SheetTable, extract_codes, extract_mappings};

// =============================================================================
// Strategies
// =============================================================================

/// Cell text drawn from a small alphabet so duplicates are frequent.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[A-C][0-2]".prop_map(|s| s),
        1 => Just(String::new()),
    ]
}

fn data_rows(width: usize) -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(cell(), width), 0..40)
}

fn table(rows: &[Vec<String>], width: usize) -> SheetTable {
    let mut raw = vec![vec!["header".to_string(); width]];
    raw.extend(std::iter::repeat_n(vec![String::new(); width], SKIPPED_ROWS));
    raw.extend(rows.iter().cloned());
    SheetTable::from_rows("Procedimientos", raw)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn extracted_codes_are_unique(rows in data_rows(2)) {
        let codes = extract_codes(&table(&rows, 2), 0, 1).expect("extract");
        let unique: HashSet<_> = codes.iter().collect();
        prop_assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn extracted_codes_follow_first_occurrence(rows in data_rows(2)) {
        let codes = extract_codes(&table(&rows, 2), 0, 1).expect("extract");

        let mut expected: Vec<(String, String)> = Vec::new();
        for row in &rows {
            if row[0].is_empty() || row[1].is_empty() {
                continue;
            }
            let pair = (row[0].clone(), row[1].clone());
            if !expected.contains(&pair) {
                expected.push(pair);
            }
        }
        let actual: Vec<(String, String)> = codes
            .into_iter()
            .map(|entry| (entry.code, entry.display))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn mappings_keep_every_complete_row(rows in data_rows(4)) {
        let pairs = extract_mappings(&table(&rows, 4), 0, 1, 2, 3).expect("extract");
        let complete = rows
            .iter()
            .filter(|row| row.iter().all(|value| !value.is_empty()))
            .count();
        prop_assert_eq!(pairs.len(), complete);
    }
}
