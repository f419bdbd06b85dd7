//! Excel I/O for the entry workbook
//!
//! - Load: `.xlsx` (file or bytes) → [`Workbook`](crate::types::Workbook),
//!   with optional row-order reversal
//! - Export: [`Workbook`](crate::types::Workbook) → `.xlsx` (file or bytes),
//!   skipping empty sheets and restoring physical row order

mod exporter;
mod importer;

pub use exporter::WorkbookExporter;
pub use importer::WorkbookLoader;
