//! REST API server module
//!
//! Exposes the plugin operations as HTTP routes. A host application merges
//! [`create_router`] (and optionally [`event_router`]) into its own server;
//! [`start_api_server`] runs a standalone one.

use crate::events::EventBus;
use crate::{ModelDownloader, Result};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Path the Swagger UI loads the OpenAPI document from
const SWAGGER_SPEC_URL: &str = "/api-docs/openapi.json";

/// Create the API router with all route definitions
///
/// Routing settings (prefix, CORS, Swagger UI) come from the downloader's own
/// configuration, so the routes always agree with the config it validated.
/// Every route is mounted under `api.route_prefix`
/// (default `/simple-model-downloader`).
///
/// # Routes
///
/// ## Models
/// - `POST {prefix}/download` - Download a model file (responds when finished)
/// - `GET {prefix}/directories` - List model directories
/// - `POST {prefix}/create-folder` - Create a folder, returns the new listing
/// - `POST {prefix}/check-file` - Resolve a file name and report whether it exists
///
/// ## System
/// - `GET {prefix}/health` - Health check
/// - `GET {prefix}/openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled)
pub fn create_router(downloader: Arc<ModelDownloader>) -> Router {
    let config = downloader.get_config();
    let state = AppState::new(downloader);

    let plugin = Router::new()
        // Models
        .route("/download", post(routes::download_model))
        .route("/directories", get(routes::get_directories))
        .route("/create-folder", post(routes::create_folder))
        .route("/check-file", post(routes::check_file_exists))
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec))
        .with_state(state);

    let prefix = config.api.route_prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        plugin
    } else {
        Router::new().nest(prefix, plugin)
    };

    let router = if config.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url(SWAGGER_SPEC_URL, ApiDoc::openapi()))
    } else {
        router
    };

    let router = router.layer(TraceLayer::new_for_http());

    // Apply CORS middleware if enabled in config
    if config.api.cors_enabled {
        let cors = build_cors_layer(&config.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Create a router serving `GET /events` as Server-Sent Events from `bus`
///
/// Kept apart from [`create_router`] because a host that already owns a push
/// channel (for example its own websocket) wires its own [`EventSink`](crate::EventSink)
/// instead.
pub fn event_router(bus: EventBus) -> Router {
    Router::new()
        .route("/events", get(routes::event_stream))
        .with_state(bus)
}

/// Build a CORS layer based on configured origins
///
/// `"*"` (or an empty list) allows any origin. Methods and headers are
/// always unrestricted.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start a standalone API server on the configured bind address.
///
/// Serves the plugin routes together with the `/events` stream fed by `bus`,
/// and shuts down gracefully on SIGINT or SIGTERM. Downloads still running at
/// that point are not waited for.
///
/// # Example
///
/// ```no_run
/// use model_dl::{Config, EventBus, ModelDownloader};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let bus = EventBus::new();
/// let downloader = Arc::new(ModelDownloader::new(Config::default(), Arc::new(bus.clone()))?);
///
/// // Start API server (blocks until shutdown)
/// model_dl::api::start_api_server(downloader, bus).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(downloader: Arc<ModelDownloader>, bus: EventBus) -> Result<()> {
    let bind_address = downloader.get_config().api.bind_address;

    tracing::info!(
        address = %bind_address,
        "Starting API server"
    );

    let app = create_router(downloader).merge(event_router(bus));

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %bind_address,
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(crate::wait_for_signal())
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
