//! Sheetpad API server module
//!
//! HTTP surface for interactive data entry: session creation from an
//! uploaded workbook or the bundled template, sheet and form inspection,
//! row submission, and workbook download. Run with `sheetpad-server`.

pub mod handlers;
pub mod server;

pub use server::run_api_server;
