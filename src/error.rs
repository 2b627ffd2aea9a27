//! Error types for model-dl
//!
//! This module provides the error handling for the library, including:
//! - Domain-specific error types (validation, download)
//! - HTTP status code mapping for API integration
//! - Machine-readable error codes for the JSON failure body

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for model-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for model-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "models_dir")
        key: Option<String>,
    },

    /// Request input was rejected before any I/O happened
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Download-related error (probe or tool run)
    #[error("{0}")]
    Download(#[from] DownloadError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// External tool could not be located or started
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Input validation errors
///
/// The messages are shown to end users as-is.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Download request without a URL or model name
    #[error("Missing URL or model name")]
    MissingUrlOrModelName,

    /// File check request without a model name or extension
    #[error("Missing model name or extension")]
    MissingModelNameOrExtension,

    /// Folder request without a usable folder name
    #[error("Folder name is required")]
    MissingFolderName,

    /// Model name has no characters left after sanitization
    #[error("Model name contains no usable characters")]
    EmptyModelName,

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// URL path has no file extension
    #[error("URL has no file extension")]
    NoExtension,

    /// URL extension is not allow-listed
    #[error("Unsupported file extension: {extension}. Supported extensions are: {supported}")]
    UnsupportedExtension {
        /// Extension found in the URL
        extension: String,
        /// Comma-separated allow-list
        supported: String,
    },

    /// Model name or fallback extension is not allow-listed
    #[error("Invalid extension: {extension}. Supported extensions are: {supported}")]
    InvalidExtension {
        /// Rejected extension
        extension: String,
        /// Comma-separated allow-list
        supported: String,
    },

    /// Model name extension differs from the URL extension
    #[error("Extension mismatch: URL has {url} but model name has {model}")]
    ExtensionMismatch {
        /// Extension found in the URL
        url: String,
        /// Extension carried by the model name
        model: String,
    },

    /// Relative path is absolute or climbs out of the models directory
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Target folder is already on disk
    #[error("Folder already exists")]
    FolderExists {
        /// The folder that was requested
        path: PathBuf,
    },

    /// Request body could not be decoded
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// Download-related errors
#[derive(Debug, Error)]
pub enum DownloadError {
    /// HEAD probe answered with a non-success status
    #[error("URL returned status code {status}")]
    BadStatus {
        /// HTTP status returned by the remote
        status: u16,
    },

    /// HEAD probe could not reach the remote
    #[error("Failed to access URL: {reason}")]
    Unreachable {
        /// Transport error text
        reason: String,
    },

    /// The download tool exited unsuccessfully
    #[error("Download failed: wget {status}")]
    ToolFailed {
        /// Exit status as reported by the OS (e.g. "exit status: 4")
        status: String,
    },
}

/// JSON body returned by every failing endpoint
///
/// # Example
///
/// ```json
/// {
///   "success": false,
///   "error": "Extension mismatch: URL has .ckpt but model name has .bin",
///   "code": "extension_mismatch"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Always `false`
    pub success: bool,

    /// Human-readable error message, suitable for end users
    pub error: String,

    /// Machine-readable error code (e.g., "folder_exists")
    pub code: String,
}

impl ApiError {
    /// Create a failure body with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            code: code.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError::new(error.error_code(), error.to_string())
    }
}

/// Convert errors to HTTP status codes for API responses
///
/// This trait maps domain errors to appropriate HTTP status codes.
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::Validation(ValidationError::FolderExists { .. }) => 409,
            Error::Validation(_) => 400,

            // 502 Bad Gateway - The remote or the tool fetching from it failed
            Error::Download(_) => 502,

            // 503 Service Unavailable - wget missing or not executable
            Error::ExternalTool(_) => 503,

            // 500 Internal Server Error - Server-side issues
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Validation(e) => match e {
                ValidationError::MissingUrlOrModelName
                | ValidationError::MissingModelNameOrExtension
                | ValidationError::MissingFolderName => "missing_field",
                ValidationError::EmptyModelName => "invalid_name",
                ValidationError::InvalidUrl(_) => "invalid_url",
                ValidationError::NoExtension => "no_extension",
                ValidationError::UnsupportedExtension { .. } => "unsupported_extension",
                ValidationError::InvalidExtension { .. } => "invalid_extension",
                ValidationError::ExtensionMismatch { .. } => "extension_mismatch",
                ValidationError::InvalidPath(_) => "invalid_path",
                ValidationError::FolderExists { .. } => "folder_exists",
                ValidationError::MalformedBody(_) => "malformed_body",
            },
            Error::Download(e) => match e {
                DownloadError::BadStatus { .. } => "url_bad_status",
                DownloadError::Unreachable { .. } => "url_unreachable",
                DownloadError::ToolFailed { .. } => "download_failed",
            },
            Error::Io(_) => "io_error",
            Error::ExternalTool(_) => "external_tool_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}
