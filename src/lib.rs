//! Sheetpad - form-driven Excel data entry
//!
//! This library loads a multi-sheet `.xlsx` workbook into an in-memory
//! session, generates a per-column entry form for any sheet, inserts
//! submitted rows at the top of the sheet, and serializes the updated
//! workbook back to `.xlsx` for download.
//!
//! # Features
//!
//! - Multi-sheet `.xlsx` load (uploaded bytes or a bundled template)
//! - Optional row-order reversal on load, undone again on export
//! - Generated entry forms: one string field per column
//! - New rows always land as the first visible row
//! - Export skips empty sheets and keeps the original sheet order
//!
//! # Example
//!
//! ```no_run
//! use sheetpad::form;
//! use sheetpad::session::Session;
//!
//! let mut session = Session::from_path("packing.xlsx", false)?;
//!
//! let mut fields = session.form("Sheet1")?;
//! fields[0].value = "Crate of bolts".to_string();
//!
//! session.insert_row("Sheet1", &form::collect_values(&fields))?;
//! let download = session.export_bytes()?;
//! # let _ = download;
//! # Ok::<(), sheetpad::error::PadError>(())
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod excel;
pub mod form;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{PadError, PadResult};
pub use form::FormField;
pub use session::{Session, SessionSource};
pub use types::{Table, Workbook};
