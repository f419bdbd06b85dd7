//! API request handlers
//!
//! Handlers for all REST API endpoints. Errors are recovered here: a failed
//! load, submission, or export produces an error response and leaves the
//! targeted session untouched.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::server::AppState;
use crate::form::FormField;
use crate::session::{Session, SessionSource};

/// MIME type of the exported workbook.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let endpoint = |path: &str, method: &str, description: &str| EndpointInfo {
        path: path.to_string(),
        method: method.to_string(),
        description: description.to_string(),
    };

    let response = RootResponse {
        name: "Sheetpad API Server".to_string(),
        version: state.version.clone(),
        description: "Form-driven Excel data entry over HTTP".to_string(),
        endpoints: vec![
            endpoint("/health", "GET", "Health check endpoint"),
            endpoint("/version", "GET", "Get server version"),
            endpoint(
                "/api/v1/sessions",
                "POST",
                "Start a session from a workbook file or the template",
            ),
            endpoint("/api/v1/sessions/:id", "DELETE", "Discard a session"),
            endpoint(
                "/api/v1/sessions/:id/sheets",
                "GET",
                "List a session's sheets",
            ),
            endpoint(
                "/api/v1/sessions/:id/sheets/:sheet",
                "GET",
                "Fetch one sheet's columns and rows",
            ),
            endpoint(
                "/api/v1/sessions/:id/sheets/:sheet/form",
                "GET",
                "Generate the entry form for a sheet",
            ),
            endpoint(
                "/api/v1/sessions/:id/rows",
                "POST",
                "Submit one form row to a sheet",
            ),
            endpoint(
                "/api/v1/sessions/:id/download",
                "GET",
                "Download the updated workbook (.xlsx)",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_sessions: usize,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let active_sessions = state.sessions.lock().expect("sessions lock poisoned").len();
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        active_sessions,
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub template_available: bool,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let template_available = state
        .template_path
        .as_deref()
        .is_some_and(|path| path.exists());
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        template_available,
    }))
}

/// Summary of one sheet, as shown in listings.
#[derive(Serialize)]
pub struct SheetInfo {
    pub name: String,
    pub columns: Vec<String>,
    pub row_count: usize,
}

fn sheet_infos(session: &Session) -> Vec<SheetInfo> {
    session
        .workbook()
        .sheets
        .values()
        .map(|table| SheetInfo {
            name: table.name.clone(),
            columns: table.columns.clone(),
            row_count: table.row_count(),
        })
        .collect()
}

fn parse_session_id(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("invalid session id: {}", id))
}

/// Create-session request
#[derive(Deserialize)]
pub struct CreateSessionRequest {
    /// Workbook to load; ignored when `template` is set.
    pub file_path: Option<String>,
    /// Use the server's bundled template as the schema source.
    #[serde(default)]
    pub template: bool,
    /// Treat each sheet's rows as stored in reverse order.
    #[serde(default)]
    pub reversed: bool,
}

/// Create-session response
#[derive(Serialize, Default)]
pub struct SessionResponse {
    pub session_id: String,
    pub source: String,
    pub created_at: String,
    pub sheets: Vec<SheetInfo>,
}

impl SessionResponse {
    fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.id.to_string(),
            source: match session.source {
                SessionSource::Upload => "upload".to_string(),
                SessionSource::Template => "template".to_string(),
            },
            created_at: session.created_at.to_rfc3339(),
            sheets: sheet_infos(session),
        }
    }
}

/// POST /api/v1/sessions - Start a session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    let result = if req.template {
        match &state.template_path {
            Some(path) => Session::from_template(path),
            None => {
                return Json(ApiResponse::<SessionResponse>::err(
                    "no template configured: template-based entry is unavailable",
                ))
            }
        }
    } else {
        match &req.file_path {
            Some(path) => Session::from_path(PathBuf::from(path), req.reversed),
            None => {
                return Json(ApiResponse::<SessionResponse>::err(
                    "file_path is required unless template is set",
                ))
            }
        }
    };

    match result {
        Ok(session) => {
            let response = SessionResponse::from_session(&session);
            state
                .sessions
                .lock()
                .expect("sessions lock poisoned")
                .insert(session.id, session);
            Json(ApiResponse::ok(response))
        }
        Err(e) => Json(ApiResponse::err(e.to_string())),
    }
}

/// Delete-session response
#[derive(Serialize, Default)]
pub struct DeleteResponse {
    pub session_id: String,
    pub deleted: bool,
}

/// DELETE /api/v1/sessions/:id - Discard a session
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let session_id = match parse_session_id(&id) {
        Ok(session_id) => session_id,
        Err(e) => return Json(ApiResponse::<DeleteResponse>::err(e)),
    };

    let deleted = state
        .sessions
        .lock()
        .expect("sessions lock poisoned")
        .remove(&session_id)
        .is_some();
    Json(ApiResponse::ok(DeleteResponse {
        session_id: id,
        deleted,
    }))
}

/// Sheet-list response
#[derive(Serialize, Default)]
pub struct SheetsResponse {
    pub sheets: Vec<SheetInfo>,
}

/// GET /api/v1/sessions/:id/sheets - List a session's sheets
pub async fn list_sheets(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let session_id = match parse_session_id(&id) {
        Ok(session_id) => session_id,
        Err(e) => return Json(ApiResponse::<SheetsResponse>::err(e)),
    };

    let sessions = state.sessions.lock().expect("sessions lock poisoned");
    match sessions.get(&session_id) {
        Some(session) => Json(ApiResponse::ok(SheetsResponse {
            sheets: sheet_infos(session),
        })),
        None => Json(ApiResponse::err(format!("unknown session: {}", id))),
    }
}

/// Single-sheet response
#[derive(Serialize, Default)]
pub struct SheetResponse {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// GET /api/v1/sessions/:id/sheets/:sheet - Fetch one sheet
pub async fn get_sheet(
    State(state): State<Arc<AppState>>,
    Path((id, sheet)): Path<(String, String)>,
) -> impl IntoResponse {
    let session_id = match parse_session_id(&id) {
        Ok(session_id) => session_id,
        Err(e) => return Json(ApiResponse::<SheetResponse>::err(e)),
    };

    let sessions = state.sessions.lock().expect("sessions lock poisoned");
    let Some(session) = sessions.get(&session_id) else {
        return Json(ApiResponse::err(format!("unknown session: {}", id)));
    };

    match session.table(&sheet) {
        Ok(table) => Json(ApiResponse::ok(SheetResponse {
            name: table.name.clone(),
            columns: table.columns.clone(),
            rows: table.rows.clone(),
        })),
        Err(e) => Json(ApiResponse::err(e.to_string())),
    }
}

/// Entry-form response
#[derive(Serialize, Default)]
pub struct FormResponse {
    pub sheet: String,
    pub fields: Vec<FormField>,
}

/// GET /api/v1/sessions/:id/sheets/:sheet/form - Generate the entry form
pub async fn get_form(
    State(state): State<Arc<AppState>>,
    Path((id, sheet)): Path<(String, String)>,
) -> impl IntoResponse {
    let session_id = match parse_session_id(&id) {
        Ok(session_id) => session_id,
        Err(e) => return Json(ApiResponse::<FormResponse>::err(e)),
    };

    let sessions = state.sessions.lock().expect("sessions lock poisoned");
    let Some(session) = sessions.get(&session_id) else {
        return Json(ApiResponse::err(format!("unknown session: {}", id)));
    };

    match session.form(&sheet) {
        Ok(fields) => Json(ApiResponse::ok(FormResponse { sheet, fields })),
        Err(e) => Json(ApiResponse::err(e.to_string())),
    }
}

/// Row-submission request
#[derive(Deserialize)]
pub struct InsertRowRequest {
    pub sheet: String,
    /// Column name → value; must cover the sheet's columns exactly.
    pub values: std::collections::HashMap<String, String>,
}

/// Row-submission response
#[derive(Serialize, Default)]
pub struct InsertRowResponse {
    pub sheet: String,
    pub row_count: usize,
}

/// POST /api/v1/sessions/:id/rows - Submit one form row
pub async fn insert_row(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<InsertRowRequest>,
) -> impl IntoResponse {
    let session_id = match parse_session_id(&id) {
        Ok(session_id) => session_id,
        Err(e) => return Json(ApiResponse::<InsertRowResponse>::err(e)),
    };

    let mut sessions = state.sessions.lock().expect("sessions lock poisoned");
    let Some(session) = sessions.get_mut(&session_id) else {
        return Json(ApiResponse::err(format!("unknown session: {}", id)));
    };

    match session.insert_row(&req.sheet, &req.values) {
        Ok(row_count) => Json(ApiResponse::ok(InsertRowResponse {
            sheet: req.sheet,
            row_count,
        })),
        Err(e) => Json(ApiResponse::err(e.to_string())),
    }
}

/// GET /api/v1/sessions/:id/download - Download the updated workbook
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&id) {
        Ok(session_id) => session_id,
        Err(e) => return Json(ApiResponse::<SessionResponse>::err(e)).into_response(),
    };

    let sessions = state.sessions.lock().expect("sessions lock poisoned");
    let Some(session) = sessions.get(&session_id) else {
        return Json(ApiResponse::<SessionResponse>::err(format!(
            "unknown session: {}",
            id
        )))
        .into_response();
    };

    match session.export_bytes() {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", session.download_filename()),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => Json(ApiResponse::<SessionResponse>::err(e.to_string())).into_response(),
    }
}
