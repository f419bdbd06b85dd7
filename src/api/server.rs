//! Sheetpad API server implementation
//!
//! HTTP REST API server using Axum. Each session owns an independent
//! in-memory workbook; the server holds the live sessions and routes
//! entry-form traffic onto them.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use super::handlers;
use crate::session::Session;

/// API Server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Bundled template workbook; template-based sessions are unavailable
    /// when unset or missing.
    pub template_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            template_path: None,
        }
    }
}

/// Shared application state: server metadata plus the live sessions.
pub struct AppState {
    pub version: String,
    pub template_path: Option<PathBuf>,
    pub sessions: Mutex<HashMap<Uuid, Session>>,
}

impl AppState {
    pub fn new(version: String, template_path: Option<PathBuf>) -> Self {
        Self {
            version,
            template_path,
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetpad_server=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(AppState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        config.template_path.clone(),
    ));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Session lifecycle
        .route("/api/v1/sessions", post(handlers::create_session))
        .route("/api/v1/sessions/:id", delete(handlers::delete_session))
        // Sheet inspection and entry
        .route("/api/v1/sessions/:id/sheets", get(handlers::list_sheets))
        .route("/api/v1/sessions/:id/sheets/:sheet", get(handlers::get_sheet))
        .route(
            "/api/v1/sessions/:id/sheets/:sheet/form",
            get(handlers::get_form),
        )
        .route("/api/v1/sessions/:id/rows", post(handlers::insert_row))
        .route("/api/v1/sessions/:id/download", get(handlers::download))
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📂 Sheetpad API Server starting on http://{}", addr);
    info!("   Sessions: POST /api/v1/sessions, DELETE /api/v1/sessions/:id");
    info!("   Entry: GET .../sheets, GET .../sheets/:sheet/form, POST .../rows, GET .../download");
    info!("   Health: /health, Version: /version");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Sheetpad API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.template_path.is_none());
    }

    #[test]
    fn test_config_custom_values() {
        let config = ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            template_path: Some(PathBuf::from("data/template.xlsx")),
        };
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.template_path.is_some());
    }

    #[test]
    fn test_config_address_format() {
        let config = ApiConfig {
            host: "192.168.1.100".to_string(),
            port: 9090,
            template_path: None,
        };
        let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse().unwrap();
        assert_eq!(addr.port(), 9090);
    }

    #[test]
    fn test_app_state_starts_with_no_sessions() {
        let state = AppState::new("0.3.0".to_string(), None);
        assert_eq!(state.version, "0.3.0");
        assert!(state.sessions.lock().unwrap().is_empty());
    }
}
