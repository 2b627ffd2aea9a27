//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`models`] - Download, directory listing, folder creation, file checks
//! - [`system`] - Health, events, OpenAPI

use crate::types::ModelDirectory;
use serde::{Deserialize, Serialize};

mod models;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use models::*;
pub use system::*;

// ============================================================================
// Response Types (shared across handlers)
// ============================================================================

/// Response for POST /download
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DownloadResponse {
    /// Always `true`; failures use the error body
    pub success: bool,
    /// Written file, relative to the models directory
    pub file_path: String,
}

/// Response for GET /directories and POST /create-folder
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DirectoriesResponse {
    /// Always `true`; failures use the error body
    pub success: bool,
    /// Every directory under the models directory, special folders first
    pub directories: Vec<ModelDirectory>,
}

/// Response for POST /check-file
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CheckFileResponse {
    /// Always `true`; failures use the error body
    pub success: bool,
    /// Whether the resolved file is already on disk
    pub exists: bool,
    /// Resolved path relative to the models directory
    pub file_path: String,
}
