//! HTTP API server for VoiceNotes.
//!
//! Exposes notes, categories and reminders as JSON resources, accepts audio
//! uploads for transcription, generates business reports, and serves the
//! bundled browser page.
//!
//! # Features
//!
//! - REST API under `/api`
//! - Multipart audio upload handed to an [`AiGateway`](voicenotes_ai::AiGateway)
//! - Permissive CORS for the WebView shell
//! - Request logging
//! - Static asset fallback
//!
//! # Example
//!
//! ```ignore
//! use voicenotes_server::{AppState, Server, ServerConfig};
//! use voicenotes_ai::{OpenAiConfig, create_shared_gateway};
//!
//! let gateway = create_shared_gateway(OpenAiConfig::openai_from_env()?)?;
//! let config = ServerConfig::new().with_bind_address("127.0.0.1:5000".parse()?);
//!
//! let server = Server::from_state(AppState::in_memory(gateway, config));
//! server.run().await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod routes;
pub mod state;

pub use config::{DEFAULT_MAX_BODY_SIZE, ServerConfig};
pub use error::{ErrorResponse, Result, ServerError};
pub use extract::JsonBody;
pub use logging::request_logging_middleware;
pub use routes::{CreateNoteRequest, ReportResponse, TranscriptionResponse};
pub use state::{AppState, SharedStorage};

use std::net::SocketAddr;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header},
    middleware,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// The VoiceNotes HTTP server.
pub struct Server {
    /// Application state.
    state: AppState,
}

impl Server {
    /// Create a new server over the given storage and gateway.
    pub fn new(
        storage: SharedStorage,
        gateway: voicenotes_ai::SharedGateway,
        config: ServerConfig,
    ) -> Self {
        Self {
            state: AppState::new(storage, gateway, config),
        }
    }

    /// Create a server from a pre-built application state.
    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        use axum::routing::get;

        Router::new()
            .route("/", get(routes::index_handler))
            .merge(self.api_routes())
            .fallback(routes::static_fallback)
            // Request logging (inner layer, sees the final status)
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                logging::request_logging_middleware,
            ))
            .layer(DefaultBodyLimit::max(self.state.config.max_body_size))
            .layer(TraceLayer::new_for_http())
            // CORS outermost so preflights never reach the handlers
            .layer(cors_layer())
            .with_state(self.state.clone())
    }

    /// API routes.
    fn api_routes(&self) -> Router<AppState> {
        use axum::routing::{get, patch, post};

        Router::new()
            // Liveness
            .route("/api", get(routes::liveness_handler))
            .route("/api/", get(routes::liveness_handler))
            // Notes
            .route(
                "/api/notes",
                get(routes::list_notes_handler).post(routes::create_note_handler),
            )
            .route(
                "/api/notes/{id}",
                get(routes::get_note_handler)
                    .patch(routes::update_note_handler)
                    .delete(routes::delete_note_handler),
            )
            .route(
                "/api/notes/{id}/reminders",
                get(routes::note_reminders_handler),
            )
            // AI
            .route("/api/transcribe", post(routes::transcribe_handler))
            .route(
                "/api/generate-report",
                post(routes::missing_note_id_handler),
            )
            .route(
                "/api/generate-report/",
                post(routes::missing_note_id_handler),
            )
            .route(
                "/api/generate-report/{note_id}",
                post(routes::generate_report_handler),
            )
            // Categories
            .route(
                "/api/categories",
                get(routes::list_categories_handler).post(routes::create_category_handler),
            )
            // Reminders
            .route(
                "/api/reminders",
                get(routes::list_reminders_handler).post(routes::create_reminder_handler),
            )
            .route(
                "/api/reminders/{id}",
                patch(routes::update_reminder_handler),
            )
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_address;
        self.run_on(addr).await
    }

    /// Run the server on a specific address (useful for testing).
    pub async fn run_on(self, addr: SocketAddr) -> Result<()> {
        let router = self.router();

        info!(
            gateway = self.state.gateway.name(),
            static_dir = %self.state.config.static_dir.display(),
            "Starting server on {}",
            addr
        );

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the configured bind address.
    pub fn bind_address(&self) -> SocketAddr {
        self.state.config.bind_address
    }
}

/// Any origin; the browser page may be loaded from a WebView or a file.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
