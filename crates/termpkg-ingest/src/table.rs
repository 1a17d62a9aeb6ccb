use crate::error::{IngestError, Result};

/// One worksheet: the header row and the rows below it, as trimmed text.
///
/// An empty string is a missing value. Rows keep their physical position,
/// blank rows included, because extraction skips a fixed number of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl SheetTable {
    /// Build a table from raw rows; the first row is the header row.
    pub fn from_rows<I, R, S>(name: impl Into<String>, raw_rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows: Vec<Vec<String>> = raw_rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| normalize_cell(cell.as_ref()))
                    .collect()
            })
            .collect();
        let headers = if rows.is_empty() {
            Vec::new()
        } else {
            rows.remove(0)
        };
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Number of columns, taken over the header and every row.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    pub fn has_column(&self, column: usize) -> bool {
        column < self.width()
    }

    /// Fail with `MissingColumn` unless every column in `columns` exists.
    pub fn require_columns(&self, columns: &[usize]) -> Result<()> {
        let width = self.width();
        match columns.iter().find(|column| **column >= width) {
            Some(column) => Err(IngestError::MissingColumn {
                sheet: self.name.clone(),
                column: *column,
                width,
            }),
            None => Ok(()),
        }
    }

    /// Header text of `column`, or `None` when absent or blank.
    pub fn header(&self, column: usize) -> Option<&str> {
        self.headers
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Cell text at (`row`, `column`), or `None` when absent or blank.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}
