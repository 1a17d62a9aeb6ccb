//! Coding systems that appear as column pairs in the mapping workbook.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A source vocabulary of codes.
///
/// The URI of each system is not part of the enum; it comes from the run
/// configuration (see [`crate::SystemUris`]) so that separate runs can use
/// separate URIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodingSystem {
    /// Codes of the node publishing the package.
    Local,
    /// The regional code list shared by all nodes (RACSEL).
    Regional,
    /// ICD-10, used by the history and diagnoses sheets.
    Icd10,
    /// ICD-11 MMS, used by the immunizations sheet.
    Icd11,
    /// SNOMED CT, the reference terminology.
    Snomed,
    /// Vaccine product registry (immunizations only, optional columns).
    Product,
}

impl CodingSystem {
    pub const ALL: [CodingSystem; 6] = [
        CodingSystem::Local,
        CodingSystem::Regional,
        CodingSystem::Icd10,
        CodingSystem::Icd11,
        CodingSystem::Snomed,
        CodingSystem::Product,
    ];

    /// Short label used in resource names ("Local to SNOMED").
    pub fn label(self) -> &'static str {
        match self {
            CodingSystem::Local => "Local",
            CodingSystem::Regional => "RACSEL",
            CodingSystem::Icd10 => "CIE10",
            CodingSystem::Icd11 => "CIE11",
            CodingSystem::Snomed => "SNOMED",
            CodingSystem::Product => "Product",
        }
    }

    /// Name of the CodeSystem fragment published for this system.
    ///
    /// SNOMED CT is hosted by the terminology server itself and is never
    /// published as a fragment.
    pub fn code_system_name(self) -> Option<&'static str> {
        match self {
            CodingSystem::Local => Some("LocalCodeSystem"),
            CodingSystem::Regional => Some("RACSELCodeSystem"),
            CodingSystem::Icd10 => Some("icd-10"),
            CodingSystem::Icd11 => Some("icd-11"),
            CodingSystem::Snomed => None,
            CodingSystem::Product => Some("ProductCodeSystem"),
        }
    }

    /// Name of the ValueSet that unions this system's codes across domains.
    pub fn value_set_name(self) -> String {
        format!("{}ValueSet", self.label())
    }

    /// Short identifier of the unified ValueSet ("racsel-vs").
    pub fn value_set_id(self) -> String {
        format!("{}-vs", self.label().to_ascii_lowercase())
    }

    /// Infix of the per-domain ValueSet name, for systems that get one.
    ///
    /// SNOMED CT is the default subject of a domain ValueSet and carries no
    /// infix (`DiagnosticosValueSet`); the classifications and the product
    /// registry have no per-domain ValueSet.
    pub fn domain_value_set_infix(self) -> Option<&'static str> {
        match self {
            CodingSystem::Snomed => Some(""),
            CodingSystem::Regional => Some("Racsel"),
            CodingSystem::Local => Some("Local"),
            CodingSystem::Icd10 | CodingSystem::Icd11 | CodingSystem::Product => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CodingSystem::Local => "local",
            CodingSystem::Regional => "regional",
            CodingSystem::Icd10 => "icd10",
            CodingSystem::Icd11 => "icd11",
            CodingSystem::Snomed => "snomed",
            CodingSystem::Product => "product",
        }
    }
}

impl fmt::Display for CodingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CodingSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        CodingSystem::ALL
            .into_iter()
            .find(|system| {
                system.as_str() == normalized || system.label().eq_ignore_ascii_case(&normalized)
            })
            .ok_or_else(|| format!("Unknown coding system: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unified_value_set_names_follow_labels() {
        assert_eq!(CodingSystem::Regional.value_set_name(), "RACSELValueSet");
        assert_eq!(CodingSystem::Snomed.value_set_id(), "snomed-vs");
        assert_eq!(CodingSystem::Local.value_set_id(), "local-vs");
        assert_eq!(CodingSystem::Icd10.value_set_name(), "CIE10ValueSet");
    }

    #[test]
    fn parses_labels_and_keys() {
        assert_eq!("racsel".parse::<CodingSystem>(), Ok(CodingSystem::Regional));
        assert_eq!("icd11".parse::<CodingSystem>(), Ok(CodingSystem::Icd11));
        assert_eq!(" SNOMED ".parse::<CodingSystem>(), Ok(CodingSystem::Snomed));
        assert!("loinc".parse::<CodingSystem>().is_err());
    }
}
