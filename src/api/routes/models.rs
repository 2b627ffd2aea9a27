//! Model file handlers.

use super::{CheckFileResponse, DirectoriesResponse, DownloadResponse};
use crate::api::AppState;
use crate::error::{Error, Result};
use crate::types::{CheckFileRequest, CreateFolderRequest, DownloadRequest};
use axum::{Json, extract::State, extract::rejection::JsonRejection};

/// POST /download - Download a model file with wget
///
/// Responds once the download has finished. Progress is pushed as events
/// while it runs. The download continues if the client disconnects, so a
/// failure still cleans up the partial file.
#[utoipa::path(
    post,
    path = "/simple-model-downloader/download",
    tag = "models",
    request_body = crate::types::DownloadRequest,
    responses(
        (status = 200, description = "Model downloaded", body = DownloadResponse),
        (status = 400, description = "Missing field, bad extension, or bad path", body = crate::error::ApiError),
        (status = 502, description = "URL unreachable or wget failed", body = crate::error::ApiError),
        (status = 503, description = "wget could not be started", body = crate::error::ApiError)
    )
)]
pub async fn download_model(
    State(state): State<AppState>,
    body: std::result::Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<DownloadResponse>> {
    let Json(request) = body?;

    let downloader = state.downloader.clone();
    let completed = tokio::spawn(async move { downloader.download(request).await })
        .await
        .map_err(|e| Error::Other(format!("download task failed: {}", e)))??;

    Ok(Json(DownloadResponse {
        success: true,
        file_path: completed.relative_path,
    }))
}

/// GET /directories - List model directories
#[utoipa::path(
    get,
    path = "/simple-model-downloader/directories",
    tag = "models",
    responses(
        (status = 200, description = "Directory listing, special folders first", body = DirectoriesResponse),
        (status = 500, description = "Internal server error", body = crate::error::ApiError)
    )
)]
pub async fn get_directories(State(state): State<AppState>) -> Result<Json<DirectoriesResponse>> {
    let directories = state.downloader.list_directories().await?;

    Ok(Json(DirectoriesResponse {
        success: true,
        directories,
    }))
}

/// POST /create-folder - Create a folder under the models directory
#[utoipa::path(
    post,
    path = "/simple-model-downloader/create-folder",
    tag = "models",
    request_body = crate::types::CreateFolderRequest,
    responses(
        (status = 200, description = "Folder created; updated listing", body = DirectoriesResponse),
        (status = 400, description = "Missing folder name or bad parent path", body = crate::error::ApiError),
        (status = 409, description = "Folder already exists", body = crate::error::ApiError)
    )
)]
pub async fn create_folder(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateFolderRequest>, JsonRejection>,
) -> Result<Json<DirectoriesResponse>> {
    let Json(request) = body?;
    let directories = state.downloader.create_folder(request).await?;

    Ok(Json(DirectoriesResponse {
        success: true,
        directories,
    }))
}

/// POST /check-file - Check whether a model file already exists
#[utoipa::path(
    post,
    path = "/simple-model-downloader/check-file",
    tag = "models",
    request_body = crate::types::CheckFileRequest,
    responses(
        (status = 200, description = "Resolved path and whether it exists", body = CheckFileResponse),
        (status = 400, description = "Missing field or unsupported extension", body = crate::error::ApiError)
    )
)]
pub async fn check_file_exists(
    State(state): State<AppState>,
    body: std::result::Result<Json<CheckFileRequest>, JsonRejection>,
) -> Result<Json<CheckFileResponse>> {
    let Json(request) = body?;
    let check = state.downloader.check_file(request).await?;

    Ok(Json(CheckFileResponse {
        success: true,
        exists: check.exists,
        file_path: check.file_path,
    }))
}
