//! Row-level values pulled out of the workbook.

use serde::{Deserialize, Serialize};

/// A code and its display text within one coding system.
///
/// Serializes as a FHIR `concept` entry (`{"code": .., "display": ..}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub display: String,
}

impl CodeEntry {
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display: display.into(),
        }
    }
}

/// One directed correspondence between a source and a target code.
///
/// `A -> B` and `B -> A` are distinct pairs; nothing inverts them implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MappingPair {
    pub source_code: String,
    pub source_display: String,
    pub target_code: String,
    pub target_display: String,
}

impl MappingPair {
    pub fn new(
        source_code: impl Into<String>,
        source_display: impl Into<String>,
        target_code: impl Into<String>,
        target_display: impl Into<String>,
    ) -> Self {
        Self {
            source_code: source_code.into(),
            source_display: source_display.into(),
            target_code: target_code.into(),
            target_display: target_display.into(),
        }
    }

    /// The source side as a code entry.
    pub fn source(&self) -> CodeEntry {
        CodeEntry::new(self.source_code.clone(), self.source_display.clone())
    }

    /// The target side as a code entry.
    pub fn target(&self) -> CodeEntry {
        CodeEntry::new(self.target_code.clone(), self.target_display.clone())
    }
}
