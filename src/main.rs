//! Workbench - a personal notes, todos, projects and chat server.
//!
//! This is the main entry point for the web server.
//! The application is organized into the following modules:
//!
//! - `config`: Environment-driven configuration
//! - `models`: Records and request/response bodies
//! - `store`: JSON index persistence shared by all resources
//! - `notes`, `todos`, `projects`: Resource managers
//! - `chat`: Chat assistant and chat log
//! - `templates`: Front end and debug pages
//! - `handlers`: HTTP route handlers

use std::process::ExitCode;
use std::sync::Arc;

use workbench::config::Config;
use workbench::{router, AppState};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    let addr = config.bind_addr();

    let state = match AppState::open(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            log::error!("Failed to open data directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Data directory: {}", state.config.data_dir.display());
    log::info!("Static directory: {}", state.config.static_dir.display());
    if state.assistant.is_online() {
        log::info!("Chat assistant: {} via {}", state.config.chat.model, state.config.chat.api_base);
    } else {
        log::info!("Chat assistant: canned replies (set OPENAI_API_KEY to enable the completion API)");
    }

    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Workbench running at http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
