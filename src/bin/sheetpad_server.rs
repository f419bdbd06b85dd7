//! Sheetpad API server binary
//!
//! HTTP surface for form-driven Excel data entry: per-session workbooks,
//! generated entry forms, row submission, workbook download.

use clap::Parser;
use sheetpad::api::{run_api_server, server::ApiConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sheetpad-server")]
#[command(version)]
#[command(about = "Sheetpad API Server - HTTP REST API for form-driven Excel data entry")]
#[command(long_about = r#"
Sheetpad API Server

Session endpoints:
  - POST   /api/v1/sessions                         - Start a session (workbook file or template)
  - DELETE /api/v1/sessions/:id                     - Discard a session
  - GET    /api/v1/sessions/:id/sheets              - List sheets
  - GET    /api/v1/sessions/:id/sheets/:sheet       - Fetch one sheet's rows
  - GET    /api/v1/sessions/:id/sheets/:sheet/form  - Generate the entry form
  - POST   /api/v1/sessions/:id/rows                - Submit one form row
  - GET    /api/v1/sessions/:id/download            - Download the updated workbook

Additional endpoints:
  - GET  /health            - Health check (includes active session count)
  - GET  /version           - Server version and template availability
  - GET  /                  - API documentation

Each session owns an independent in-memory workbook; nothing is persisted
server-side. The download response carries the .xlsx MIME type and a
timestamped filename.

Example usage:
  sheetpad-server                                    # Start on localhost:8080
  sheetpad-server --host 0.0.0.0 --port 3000 --template-path data/template.xlsx

  curl -X POST http://localhost:8080/api/v1/sessions \
    -H "Content-Type: application/json" \
    -d '{"file_path": "packing.xlsx"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SHEETPAD_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SHEETPAD_PORT")]
    port: u16,

    /// Bundled template workbook for sessions without an uploaded file
    #[arg(long, env = "SHEETPAD_TEMPLATE")]
    template_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        template_path: args.template_path,
    };

    run_api_server(config).await
}
