//! Error taxonomy tests: variants, display messages, conversions

use sheetpad::error::{PadError, PadResult};

#[test]
fn test_io_error_conversion() {
    fn read_missing() -> PadResult<String> {
        let content = std::fs::read_to_string("no/such/file.txt")?;
        Ok(content)
    }

    let err = read_missing().unwrap_err();
    assert!(matches!(err, PadError::Io(_)));
    assert!(err.to_string().starts_with("IO error:"));
}

#[test]
fn test_format_error_display() {
    let err = PadError::Format("failed to parse workbook: not a zip".to_string());
    assert_eq!(
        err.to_string(),
        "format error: failed to parse workbook: not a zip"
    );
}

#[test]
fn test_column_mismatch_display() {
    let err = PadError::ColumnMismatch("sheet 'Outbound' is missing values for: Qty".to_string());
    assert!(err.to_string().starts_with("column mismatch:"));
    assert!(err.to_string().contains("Qty"));
}

#[test]
fn test_unknown_sheet_display() {
    let err = PadError::UnknownSheet("Inbound".to_string());
    assert_eq!(err.to_string(), "unknown sheet: Inbound");
}

#[test]
fn test_empty_export_is_a_one_line_message() {
    let err = PadError::EmptyExport;
    let message = err.to_string();
    assert_eq!(message, "nothing to export: every sheet is empty");
    assert!(!message.contains('\n'));
}

#[test]
fn test_export_error_display() {
    let err = PadError::Export("failed to set worksheet name: too long".to_string());
    assert!(err.to_string().starts_with("export error:"));
}
