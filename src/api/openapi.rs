//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the model-dl REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the model-dl REST API
///
/// The spec can be accessed via:
/// - `{prefix}/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "model-dl REST API",
        version = "0.1.0",
        description = "Model file manager: list and create model folders, check for existing files, and download models with wget",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://127.0.0.1:8188", description = "Local host application")
    ),
    paths(
        // Models
        crate::api::routes::download_model,
        crate::api::routes::get_directories,
        crate::api::routes::create_folder,
        crate::api::routes::check_file_exists,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
        crate::api::routes::event_stream,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::ModelDirectory,
        crate::types::DownloadRequest,
        crate::types::CheckFileRequest,
        crate::types::CreateFolderRequest,
        crate::types::DownloadProgress,

        // API response types from routes
        crate::api::routes::DownloadResponse,
        crate::api::routes::DirectoriesResponse,
        crate::api::routes::CheckFileResponse,

        // Error body
        crate::error::ApiError,
    )),
    tags(
        (name = "models", description = "Model files - Download, list folders, create folders, check for existing files"),
        (name = "system", description = "System endpoints - Health check, OpenAPI spec, download events"),
    )
)]
pub struct ApiDoc;
