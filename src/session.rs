//! Per-session workbook state
//!
//! One [`Session`] owns one in-memory [`Workbook`] for the lifetime of an
//! interactive editing session. The session is an explicitly passed value,
//! never ambient global state, so independent sessions can coexist in one
//! process. Nothing is persisted: the only artifact that leaves the process
//! is the exported workbook.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

use crate::error::{PadError, PadResult};
use crate::excel::{WorkbookExporter, WorkbookLoader};
use crate::form::{self, FormField};
use crate::types::{Table, Workbook};

/// Where a session's workbook came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionSource {
    /// User-supplied workbook file.
    Upload,
    /// The bundled template workbook, used as a schema source.
    Template,
}

/// An interactive editing session over one workbook.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub source: SessionSource,
    workbook: Workbook,
}

impl Session {
    fn new(workbook: Workbook, source: SessionSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source,
            workbook,
        }
    }

    /// Start a session from uploaded workbook bytes.
    pub fn from_bytes(bytes: &[u8], reversed: bool) -> PadResult<Self> {
        let workbook = WorkbookLoader::new(reversed).load_bytes(bytes)?;
        Ok(Self::new(workbook, SessionSource::Upload))
    }

    /// Start a session from a workbook file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P, reversed: bool) -> PadResult<Self> {
        let workbook = WorkbookLoader::new(reversed).load_path(path)?;
        Ok(Self::new(workbook, SessionSource::Upload))
    }

    /// Start a session from the bundled template workbook.
    ///
    /// A missing template means template-based entry is unavailable; that is
    /// reported as a [`PadError::Format`] for the caller to surface, never a
    /// crash.
    pub fn from_template<P: AsRef<Path>>(path: P) -> PadResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PadError::Format(format!(
                "template file not found: {}",
                path.display()
            )));
        }
        let workbook = WorkbookLoader::new(false).load_path(path)?;
        Ok(Self::new(workbook, SessionSource::Template))
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook.sheet_names()
    }

    pub fn table(&self, sheet: &str) -> PadResult<&Table> {
        self.workbook.table(sheet)
    }

    /// Generate the entry form for the named sheet.
    pub fn form(&self, sheet: &str) -> PadResult<Vec<FormField>> {
        Ok(form::fields_for(self.table(sheet)?))
    }

    /// Submit one form row to the named sheet. Returns the sheet's new row
    /// count; on error the workbook is unchanged.
    pub fn insert_row(
        &mut self,
        sheet: &str,
        values: &HashMap<String, String>,
    ) -> PadResult<usize> {
        self.workbook.insert_row(sheet, values)?;
        Ok(self.workbook.table(sheet)?.row_count())
    }

    /// Serialize the session's workbook for download.
    pub fn export_bytes(&self) -> PadResult<Vec<u8>> {
        WorkbookExporter::new(&self.workbook).export_to_buffer()
    }

    /// Write the session's workbook to a file.
    pub fn export_to_path<P: AsRef<Path>>(&self, path: P) -> PadResult<()> {
        WorkbookExporter::new(&self.workbook).export(path.as_ref())
    }

    /// Default download filename, stamped with the session start time.
    pub fn download_filename(&self) -> String {
        format!("sheetpad_{}.xlsx", self.created_at.format("%Y%m%d_%H%M%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_workbook_bytes() -> Vec<u8> {
        let mut workbook = Workbook::new(false);
        let mut table = Table::new(
            "Packing".to_string(),
            vec!["Item".to_string(), "Qty".to_string()],
        );
        table.push_row(vec!["A".to_string(), "1".to_string()]);
        workbook.add_table(table);
        WorkbookExporter::new(&workbook).export_to_buffer().unwrap()
    }

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_session_from_bytes() {
        let session = Session::from_bytes(&sample_workbook_bytes(), false).unwrap();
        assert_eq!(session.source, SessionSource::Upload);
        assert_eq!(session.sheet_names(), vec!["Packing"]);
    }

    #[test]
    fn test_session_rejects_garbage_bytes() {
        let err = Session::from_bytes(b"not a workbook", false).unwrap_err();
        assert!(matches!(err, PadError::Format(_)));
    }

    #[test]
    fn test_insert_then_export_round_trip() {
        let mut session = Session::from_bytes(&sample_workbook_bytes(), false).unwrap();
        let count = session
            .insert_row("Packing", &row(&[("Item", "B"), ("Qty", "2")]))
            .unwrap();
        assert_eq!(count, 2);

        // Reload the exported bytes: the new row must be the first physical row.
        let reloaded = Session::from_bytes(&session.export_bytes().unwrap(), false).unwrap();
        let table = reloaded.table("Packing").unwrap();
        assert_eq!(table.rows[0], vec!["B".to_string(), "2".to_string()]);
        assert_eq!(table.rows[1], vec!["A".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_failed_submission_keeps_session_usable() {
        let mut session = Session::from_bytes(&sample_workbook_bytes(), false).unwrap();
        assert!(session.insert_row("Packing", &row(&[("Item", "B")])).is_err());
        assert!(session.insert_row("Missing", &row(&[])).is_err());

        // Prior state untouched, next valid action still works.
        assert_eq!(session.table("Packing").unwrap().row_count(), 1);
        session
            .insert_row("Packing", &row(&[("Item", "B"), ("Qty", "2")]))
            .unwrap();
    }

    #[test]
    fn test_template_session() {
        let dir = TempDir::new().unwrap();
        let template_path = dir.path().join("template.xlsx");
        std::fs::write(&template_path, sample_workbook_bytes()).unwrap();

        let session = Session::from_template(&template_path).unwrap();
        assert_eq!(session.source, SessionSource::Template);
        assert_eq!(session.sheet_names(), vec!["Packing"]);
    }

    #[test]
    fn test_missing_template_reports_format_error() {
        let err = Session::from_template("no/such/template.xlsx").unwrap_err();
        assert!(matches!(err, PadError::Format(_)));
        assert!(err.to_string().contains("template"));
    }

    #[test]
    fn test_download_filename_is_stamped_xlsx() {
        let session = Session::from_bytes(&sample_workbook_bytes(), false).unwrap();
        let name = session.download_filename();
        assert!(name.starts_with("sheetpad_"));
        assert!(name.ends_with(".xlsx"));
    }
}
