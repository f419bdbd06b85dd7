//! Workbook loader - Excel (.xlsx) → in-memory workbook

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

use crate::error::{PadError, PadResult};
use crate::types::{Table, Workbook};

/// Loader for turning `.xlsx` sources into an in-memory [`Workbook`].
///
/// Each sheet's first physical row is its header and fixes the column set.
/// With `reversed` set, the data rows of every sheet are flipped on load so
/// the last physical row becomes the first logical row.
pub struct WorkbookLoader {
    reversed: bool,
}

impl WorkbookLoader {
    pub fn new(reversed: bool) -> Self {
        Self { reversed }
    }

    /// Load a workbook from a file on disk.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> PadResult<Workbook> {
        let mut source: Xlsx<_> = open_workbook(path.as_ref())
            .map_err(|e| PadError::Format(format!("failed to open workbook: {}", e)))?;
        self.read_sheets(&mut source)
    }

    /// Load a workbook from uploaded bytes.
    pub fn load_bytes(&self, bytes: &[u8]) -> PadResult<Workbook> {
        let mut source: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))
            .map_err(|e| PadError::Format(format!("failed to parse workbook: {}", e)))?;
        self.read_sheets(&mut source)
    }

    fn read_sheets<RS: std::io::Read + std::io::Seek>(
        &self,
        source: &mut Xlsx<RS>,
    ) -> PadResult<Workbook> {
        let mut workbook = Workbook::new(self.reversed);

        let sheet_names = source.sheet_names().to_vec();
        for sheet_name in sheet_names {
            if let Ok(range) = source.worksheet_range(&sheet_name) {
                if let Some(table) = self.read_table(&sheet_name, &range) {
                    workbook.add_table(table);
                }
            }
        }

        Ok(workbook)
    }

    /// Read one sheet into a table. Returns `None` for sheets without a
    /// header row, which cannot define a column set.
    fn read_table(&self, sheet_name: &str, range: &Range<Data>) -> Option<Table> {
        let (height, width) = range.get_size();
        if height == 0 || width == 0 {
            return None;
        }

        // Header row fixes the column set.
        let mut columns: Vec<String> = Vec::with_capacity(width);
        for col in 0..width {
            let name = match range.get((0, col)) {
                Some(Data::Empty) | None => format!("col_{}", col),
                Some(cell) => cell_to_string(cell),
            };
            columns.push(name);
        }

        let mut table = Table::new(sheet_name.to_string(), columns);

        // Data rows, in physical order.
        for row in 1..height {
            let values: Vec<String> = (0..width)
                .map(|col| {
                    range
                        .get((row, col))
                        .map(cell_to_string)
                        .unwrap_or_default()
                })
                .collect();
            table.push_row(values);
        }

        if self.reversed {
            table.rows.reverse();
        }

        Some(table)
    }
}

/// Render one cell to the string form used on the entry path.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    // Round to 6 decimal places, enough for hand-entered quantities and
    // prices, then trim trailing zeros.
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
