//! Tabular extraction of code lists and mapping rows.
//!
//! Both extractors skip the first two rows below the header, which hold
//! column notes in the source workbooks, and drop rows where any extracted
//! cell is missing.

use std::collections::BTreeSet;

use termpkg_model::{CodeEntry, CodingSystem, ColumnPair, Domain, MappingPair};
use tracing::{debug, trace};

use crate::error::{IngestError, Result};
use crate::table::SheetTable;
use crate::workbook::Workbook;

/// Rows below the header that never hold data.
pub const SKIPPED_ROWS: usize = 2;

/// Extract unique (code, display) entries in first-occurrence order.
pub fn extract_codes(
    table: &SheetTable,
    code_column: usize,
    display_column: usize,
) -> Result<Vec<CodeEntry>> {
    table.require_columns(&[code_column, display_column])?;
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut entries = Vec::new();
    for row in SKIPPED_ROWS..table.rows.len() {
        let (Some(code), Some(display_text)) = (
            table.cell(row, code_column),
            table.cell(row, display_column),
        ) else {
            continue;
        };
        if seen.insert((code, display_text)) {
            trace!(sheet = %table.name, code, display = display_text, "code entry");
            entries.push(CodeEntry::new(code, display_text));
        }
    }
    debug!(
        sheet = %table.name,
        code_column,
        entries = entries.len(),
        "extracted codes"
    );
    Ok(entries)
}

/// Extract mapping rows. Rows are not deduplicated: one source code may map
/// to several targets, and repeated rows are kept as they appear.
pub fn extract_mappings(
    table: &SheetTable,
    source_code_column: usize,
    source_display_column: usize,
    target_code_column: usize,
    target_display_column: usize,
) -> Result<Vec<MappingPair>> {
    table.require_columns(&[
        source_code_column,
        source_display_column,
        target_code_column,
        target_display_column,
    ])?;
    let mut pairs = Vec::new();
    for row in SKIPPED_ROWS..table.rows.len() {
        let cells = (
            table.cell(row, source_code_column),
            table.cell(row, source_display_column),
            table.cell(row, target_code_column),
            table.cell(row, target_display_column),
        );
        if let (Some(source_code), Some(source_display), Some(target_code), Some(target_display)) =
            cells
        {
            pairs.push(MappingPair::new(
                source_code,
                source_display,
                target_code,
                target_display,
            ));
        }
    }
    debug!(
        sheet = %table.name,
        source_code_column,
        target_code_column,
        pairs = pairs.len(),
        "extracted mappings"
    );
    Ok(pairs)
}

/// Domain-level view of a workbook.
///
/// Resolves each domain's sheet and column layout so callers work in terms
/// of domains and coding systems rather than sheet names and indices.
#[derive(Debug, Clone, Copy)]
pub struct DomainSheets<'a> {
    workbook: &'a Workbook,
}

impl<'a> DomainSheets<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    pub fn workbook(&self) -> &'a Workbook {
        self.workbook
    }

    /// Sheet of `domain`.
    pub fn sheet(&self, domain: Domain) -> Result<&'a SheetTable> {
        self.workbook.sheet(domain.sheet_name())
    }

    /// Check that every domain sheet exists with all its required columns.
    pub fn validate(&self) -> Result<()> {
        for domain in Domain::ALL {
            let sheet = self.sheet(domain)?;
            for system in domain.systems() {
                if domain.is_optional(system) {
                    continue;
                }
                if let Some(columns) = domain.columns(system) {
                    sheet.require_columns(&[columns.code, columns.display])?;
                }
            }
        }
        Ok(())
    }

    /// Whether `domain` carries `system`: the layout assigns it columns and
    /// the sheet is wide enough to hold them.
    pub fn has_columns(&self, domain: Domain, system: CodingSystem) -> Result<bool> {
        let Some(columns) = domain.columns(system) else {
            return Ok(false);
        };
        let sheet = self.sheet(domain)?;
        Ok(sheet.has_column(columns.last()))
    }

    /// Code entries of `system` in `domain`.
    ///
    /// A system the domain does not carry yields no entries.
    pub fn codes(&self, domain: Domain, system: CodingSystem) -> Result<Vec<CodeEntry>> {
        let Some(columns) = self.carried_columns(domain, system)? else {
            return Ok(Vec::new());
        };
        extract_codes(self.sheet(domain)?, columns.code, columns.display)
    }

    /// Direct mapping rows from `source` to `target` in `domain`.
    pub fn mappings(
        &self,
        domain: Domain,
        source: CodingSystem,
        target: CodingSystem,
    ) -> Result<Vec<MappingPair>> {
        let (Some(from), Some(to)) = (
            self.carried_columns(domain, source)?,
            self.carried_columns(domain, target)?,
        ) else {
            return Ok(Vec::new());
        };
        extract_mappings(
            self.sheet(domain)?,
            from.code,
            from.display,
            to.code,
            to.display,
        )
    }

    fn carried_columns(
        &self,
        domain: Domain,
        system: CodingSystem,
    ) -> Result<Option<ColumnPair>> {
        let Some(columns) = domain.columns(system) else {
            return Ok(None);
        };
        if domain.is_optional(system) && !self.has_columns(domain, system)? {
            return Ok(None);
        }
        let sheet = self.sheet(domain)?;
        if !sheet.has_column(columns.last()) {
            return Err(IngestError::MissingColumn {
                sheet: sheet.name.clone(),
                column: columns.last(),
                width: sheet.width(),
            });
        }
        Ok(Some(columns))
    }
}
