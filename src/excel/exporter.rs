//! Workbook exporter - in-memory workbook → Excel (.xlsx)

use rust_xlsxwriter::Workbook as XlsxWorkbook;
use std::path::Path;

use crate::error::{PadError, PadResult};
use crate::types::{Table, Workbook};

/// Exporter for serializing a [`Workbook`] back to `.xlsx`.
///
/// Empty sheets are skipped; the remaining sheets keep their original
/// relative order. Physical row order on write undoes the load-time
/// reversal convention, so an unedited reversed workbook round-trips to the
/// exact original file layout.
pub struct WorkbookExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> WorkbookExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    /// Export to a file on disk.
    pub fn export(&self, output_path: &Path) -> PadResult<()> {
        let mut output = self.build()?;
        output
            .save(output_path)
            .map_err(|e| PadError::Export(format!("failed to save workbook: {}", e)))?;
        Ok(())
    }

    /// Export to an in-memory buffer, for download delivery.
    pub fn export_to_buffer(&self) -> PadResult<Vec<u8>> {
        let mut output = self.build()?;
        output
            .save_to_buffer()
            .map_err(|e| PadError::Export(format!("failed to serialize workbook: {}", e)))
    }

    fn build(&self) -> PadResult<XlsxWorkbook> {
        if !self.workbook.has_rows() {
            return Err(PadError::EmptyExport);
        }

        let mut output = XlsxWorkbook::new();
        for table in self.workbook.sheets.values() {
            if table.is_empty() {
                continue;
            }
            self.write_table(&mut output, table)?;
        }
        Ok(output)
    }

    /// Write a single table to a worksheet.
    fn write_table(&self, output: &mut XlsxWorkbook, table: &Table) -> PadResult<()> {
        let worksheet = output.add_worksheet();
        worksheet
            .set_name(&table.name)
            .map_err(|e| PadError::Export(format!("failed to set worksheet name: {}", e)))?;

        // Header row (row 0).
        for (col_idx, col_name) in table.columns.iter().enumerate() {
            worksheet
                .write_string(0, col_idx as u16, col_name)
                .map_err(|e| PadError::Export(format!("failed to write header: {}", e)))?;
        }

        // Data rows, restored to physical order: a reversed workbook tracks
        // rows last-physical-first, so they are written back in reverse.
        let rows: Box<dyn Iterator<Item = &Vec<String>>> = if self.workbook.reversed {
            Box::new(table.rows.iter().rev())
        } else {
            Box::new(table.rows.iter())
        };

        for (row_idx, row) in rows.enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                worksheet
                    .write_string((row_idx + 1) as u32, col_idx as u16, value)
                    .map_err(|e| PadError::Export(format!("failed to write cell: {}", e)))?;
            }
        }

        Ok(())
    }
}
