use indexmap::IndexMap;
use std::collections::HashMap;

use crate::error::{PadError, PadResult};

//==============================================================================
// Table
//==============================================================================

/// A single sheet: a fixed, ordered column set and rows in logical order.
///
/// Logical order is what the user sees and edits; it may be the reverse of
/// the physical on-disk order (see [`Workbook::reversed`]). Rows are
/// append-only from the entry form and every cell is a string on this path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    /// Column names in header order. Fixed once the table is created.
    pub columns: Vec<String>,
    /// Rows in logical order, each aligned with `columns`.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: String, columns: Vec<String>) -> Self {
        Self {
            name,
            columns,
            rows: Vec::new(),
        }
    }

    /// Append an already-aligned row at the logical back (loader use only).
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// A table with zero rows is excluded from export.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Return a copy of this table with `values` as the new first logical row.
    ///
    /// The submitted map must cover the column set exactly: a value (possibly
    /// the empty string) for every column, and no keys outside it. The
    /// original table is left untouched, so a rejected submission cannot
    /// corrupt session state.
    pub fn with_new_row(&self, values: &HashMap<String, String>) -> PadResult<Table> {
        let missing: Vec<&String> = self
            .columns
            .iter()
            .filter(|col| !values.contains_key(*col))
            .collect();
        if !missing.is_empty() {
            return Err(PadError::ColumnMismatch(format!(
                "sheet '{}' is missing values for: {}",
                self.name,
                missing
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        let mut extra: Vec<&String> = values
            .keys()
            .filter(|key| !self.columns.contains(key))
            .collect();
        if !extra.is_empty() {
            extra.sort();
            return Err(PadError::ColumnMismatch(format!(
                "sheet '{}' has no columns named: {}",
                self.name,
                extra
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        // Align the map with the header order, then prepend. The new row is
        // always the first logical row; the append-then-reverse variant is
        // deliberately not supported.
        let row: Vec<String> = self
            .columns
            .iter()
            .map(|col| values[col].clone())
            .collect();

        let mut updated = self.clone();
        updated.rows.insert(0, row);
        Ok(updated)
    }
}

//==============================================================================
// Workbook
//==============================================================================

/// A named collection of tables, modeling one multi-sheet `.xlsx` file.
///
/// Sheet order is preserved from the source file and carried through to
/// export, so the map is insertion-ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    /// Sheet name → table, in original file order.
    pub sheets: IndexMap<String, Table>,
    /// Row-order convention: when true, each table's logical row order is
    /// the physical sheet order flipped, and export flips it back.
    pub reversed: bool,
}

impl Workbook {
    pub fn new(reversed: bool) -> Self {
        Self {
            sheets: IndexMap::new(),
            reversed,
        }
    }

    pub fn add_table(&mut self, table: Table) {
        self.sheets.insert(table.name.clone(), table);
    }

    pub fn table(&self, sheet: &str) -> PadResult<&Table> {
        self.sheets
            .get(sheet)
            .ok_or_else(|| PadError::UnknownSheet(sheet.to_string()))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(|name| name.as_str()).collect()
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// True if at least one sheet has rows, i.e. export has something to write.
    pub fn has_rows(&self) -> bool {
        self.sheets.values().any(|table| !table.is_empty())
    }

    /// Insert one submitted row at the top of the named sheet.
    ///
    /// The table is replaced only after validation succeeds; on any error the
    /// workbook is unchanged and the submission is dropped.
    pub fn insert_row(&mut self, sheet: &str, values: &HashMap<String, String>) -> PadResult<()> {
        let updated = self.table(sheet)?.with_new_row(values)?;
        self.sheets.insert(sheet.to_string(), updated);
        Ok(())
    }
}
