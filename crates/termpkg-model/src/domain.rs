//! Clinical domains, one workbook sheet each, and their fixed column layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CodingSystem;

/// Zero-based column indices of a code column and its display column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnPair {
    pub code: usize,
    pub display: usize,
}

impl ColumnPair {
    pub const fn new(code: usize, display: usize) -> Self {
        Self { code, display }
    }

    /// Highest column index this pair touches.
    pub fn last(self) -> usize {
        self.code.max(self.display)
    }
}

const REGIONAL_COLUMNS: ColumnPair = ColumnPair::new(1, 2);
const LOCAL_COLUMNS: ColumnPair = ColumnPair::new(3, 4);
const CLASSIFICATION_COLUMNS: ColumnPair = ColumnPair::new(5, 6);
const REFERENCE_COLUMNS: ColumnPair = ColumnPair::new(7, 8);
const PRODUCT_COLUMNS: ColumnPair = ColumnPair::new(9, 10);

/// A clinical domain of the mapping workbook.
///
/// Every domain shares the column layout regional (1-2), local (3-4),
/// classification (5-6), SNOMED CT (7-8); the classification depends on the
/// domain and immunizations may carry product registry codes in 9-10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    /// Personal history ("Antecedentes Personales").
    History,
    /// Diagnoses ("Diagnósticos").
    Diagnoses,
    /// Immunizations ("Vacunas").
    Immunizations,
    /// Allergies ("Alergias").
    Allergies,
    /// Medications ("Medicación").
    Medications,
    /// Procedures ("Procedimientos").
    Procedures,
}

impl Domain {
    /// All domains in workbook order. Union catalogs follow this order.
    pub const ALL: [Domain; 6] = [
        Domain::History,
        Domain::Diagnoses,
        Domain::Immunizations,
        Domain::Allergies,
        Domain::Medications,
        Domain::Procedures,
    ];

    /// Sheet name as it appears in the workbook, trailing spaces included.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Domain::History => "Antecedentes Personales ",
            Domain::Diagnoses => "Diagnósticos",
            Domain::Immunizations => "Vacunas",
            Domain::Allergies => "Alergias",
            Domain::Medications => "Medicación ",
            Domain::Procedures => "Procedimientos",
        }
    }

    /// Prefix used for per-domain resource names (`VacunasLocalValueSet`).
    pub fn prefix(self) -> &'static str {
        match self {
            Domain::History => "AntecedentesPersonales",
            Domain::Diagnoses => "Diagnosticos",
            Domain::Immunizations => "Vacunas",
            Domain::Allergies => "Alergias",
            Domain::Medications => "Medicacion",
            Domain::Procedures => "Procedimientos",
        }
    }

    /// Slug used in ValueSet identifiers and split local system URIs.
    pub fn slug(self) -> &'static str {
        match self {
            Domain::History => "antecedentes-personales",
            Domain::Diagnoses => "diagnosticos",
            Domain::Immunizations => "vacunas",
            Domain::Allergies => "alergias",
            Domain::Medications => "medicacion",
            Domain::Procedures => "procedimientos",
        }
    }

    /// English label for summaries and logs.
    pub fn label(self) -> &'static str {
        match self {
            Domain::History => "History",
            Domain::Diagnoses => "Diagnoses",
            Domain::Immunizations => "Immunizations",
            Domain::Allergies => "Allergies",
            Domain::Medications => "Medications",
            Domain::Procedures => "Procedures",
        }
    }

    /// Classification system held in columns 5-6, if the domain has one.
    pub fn classification(self) -> Option<CodingSystem> {
        match self {
            Domain::History | Domain::Diagnoses => Some(CodingSystem::Icd10),
            Domain::Immunizations => Some(CodingSystem::Icd11),
            Domain::Allergies | Domain::Medications | Domain::Procedures => None,
        }
    }

    /// Columns holding `system` in this domain's sheet.
    pub fn columns(self, system: CodingSystem) -> Option<ColumnPair> {
        match system {
            CodingSystem::Regional => Some(REGIONAL_COLUMNS),
            CodingSystem::Local => Some(LOCAL_COLUMNS),
            CodingSystem::Snomed => Some(REFERENCE_COLUMNS),
            CodingSystem::Icd10 | CodingSystem::Icd11 => {
                (self.classification() == Some(system)).then_some(CLASSIFICATION_COLUMNS)
            }
            CodingSystem::Product => {
                (self == Domain::Immunizations).then_some(PRODUCT_COLUMNS)
            }
        }
    }

    /// Whether the columns of `system` are optional in this domain's sheet.
    ///
    /// Only the product registry columns may be missing without failing the run.
    pub fn is_optional(self, system: CodingSystem) -> bool {
        system == CodingSystem::Product
    }

    /// Coding systems laid out in this domain's sheet, in column order.
    pub fn systems(self) -> Vec<CodingSystem> {
        let mut systems: Vec<(usize, CodingSystem)> = CodingSystem::ALL
            .into_iter()
            .filter_map(|system| self.columns(system).map(|cols| (cols.code, system)))
            .collect();
        systems.sort_by_key(|(column, _)| *column);
        systems.into_iter().map(|(_, system)| system).collect()
    }

    /// Name of this domain's ValueSet over `system`, if it has one.
    pub fn value_set_name(self, system: CodingSystem) -> Option<String> {
        let infix = system.domain_value_set_infix()?;
        Some(format!("{}{infix}ValueSet", self.prefix()))
    }

    /// Short identifier of this domain's ValueSet over `system`.
    pub fn value_set_id(self, system: CodingSystem) -> Option<String> {
        let infix = system.domain_value_set_infix()?;
        if infix.is_empty() {
            Some(format!("{}-vs", self.slug()))
        } else {
            Some(format!("{}-{}-vs", self.slug(), infix.to_ascii_lowercase()))
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        Domain::ALL
            .into_iter()
            .find(|domain| {
                domain.label().eq_ignore_ascii_case(normalized)
                    || domain.slug().eq_ignore_ascii_case(normalized)
                    || domain.sheet_name().trim().eq_ignore_ascii_case(normalized)
            })
            .ok_or_else(|| format!("Unknown domain: {s}"))
    }
}
