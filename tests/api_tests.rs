//! API surface tests: response wrapper, config, and request parsing

use sheetpad::api::handlers::{ApiResponse, CreateSessionRequest, InsertRowRequest, XLSX_MIME};
use sheetpad::api::server::{ApiConfig, AppState};
use sheetpad::excel::WorkbookExporter;
use sheetpad::session::Session;
use sheetpad::types::{Table, Workbook};
use std::path::PathBuf;

fn sample_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new(false);
    let mut table = Table::new("Packing".to_string(), vec!["Item".to_string()]);
    table.push_row(vec!["A".to_string()]);
    workbook.add_table(table);
    WorkbookExporter::new(&workbook).export_to_buffer().unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// CONFIG AND STATE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_config_default() {
    let config = ApiConfig::default();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert!(config.template_path.is_none());
}

#[test]
fn test_config_clone() {
    let config = ApiConfig {
        host: "0.0.0.0".to_string(),
        port: 3000,
        template_path: Some(PathBuf::from("t.xlsx")),
    };
    let cloned = config.clone();
    assert_eq!(config.host, cloned.host);
    assert_eq!(config.port, cloned.port);
    assert_eq!(config.template_path, cloned.template_path);
}

#[test]
fn test_app_state_holds_independent_sessions() {
    let state = AppState::new("0.3.0".to_string(), None);

    let first = Session::from_bytes(&sample_bytes(), false).unwrap();
    let second = Session::from_bytes(&sample_bytes(), false).unwrap();
    assert_ne!(first.id, second.id);

    let mut sessions = state.sessions.lock().unwrap();
    sessions.insert(first.id, first);
    sessions.insert(second.id, second);
    assert_eq!(sessions.len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// RESPONSE WRAPPER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_api_response_ok() {
    let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
    assert!(response.success);
    assert_eq!(response.data, Some("test".to_string()));
    assert!(response.error.is_none());
    // UUID format: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
    assert_eq!(response.request_id.len(), 36);
}

#[test]
fn test_api_response_err() {
    let response: ApiResponse<String> = ApiResponse::err("error message");
    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.error, Some("error message".to_string()));
}

#[test]
fn test_api_response_serialization_skips_empty_fields() {
    let response: ApiResponse<String> = ApiResponse::err("boom");
    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"error\":\"boom\""));
    assert!(!json.contains("\"data\""));
}

// ═══════════════════════════════════════════════════════════════════════════
// REQUEST PARSING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_create_session_request_defaults() {
    let req: CreateSessionRequest =
        serde_json::from_str(r#"{"file_path": "packing.xlsx"}"#).unwrap();
    assert_eq!(req.file_path.as_deref(), Some("packing.xlsx"));
    assert!(!req.template);
    assert!(!req.reversed);
}

#[test]
fn test_create_session_request_template_mode() {
    let req: CreateSessionRequest = serde_json::from_str(r#"{"template": true}"#).unwrap();
    assert!(req.template);
    assert!(req.file_path.is_none());
}

#[test]
fn test_insert_row_request_parses_value_map() {
    let req: InsertRowRequest = serde_json::from_str(
        r#"{"sheet": "Outbound", "values": {"Item": "Crate", "Qty": ""}}"#,
    )
    .unwrap();
    assert_eq!(req.sheet, "Outbound");
    assert_eq!(req.values.get("Item").map(String::as_str), Some("Crate"));
    assert_eq!(req.values.get("Qty").map(String::as_str), Some(""));
}

// ═══════════════════════════════════════════════════════════════════════════
// DOWNLOAD CONTRACT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_xlsx_mime_type() {
    assert_eq!(
        XLSX_MIME,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[test]
fn test_download_bytes_are_a_loadable_workbook() {
    let session = Session::from_bytes(&sample_bytes(), false).unwrap();
    let bytes = session.export_bytes().unwrap();
    let reloaded = Session::from_bytes(&bytes, false).unwrap();
    assert_eq!(reloaded.sheet_names(), vec!["Packing"]);
}
