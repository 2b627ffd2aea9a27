//! Directory listing, folder creation, and existence checks

use super::ModelDownloader;
use super::naming::{ExtensionPolicy, model_file_name};
use crate::directories::list_model_dirs;
use crate::error::{Error, Result, ValidationError};
use crate::types::{CheckFileRequest, CreateFolderRequest, FileCheck, ModelDirectory};
use crate::utils::{checked_relative, sanitize_folder_name, to_posix};

impl ModelDownloader {
    /// List every directory under the models directory
    ///
    /// See [`list_model_dirs`] for the ordering rules. The walk runs on the
    /// blocking pool.
    pub async fn list_directories(&self) -> Result<Vec<ModelDirectory>> {
        let base = self.config.models_dir().clone();
        let special_dirs = self.config.models.special_dirs.clone();

        tokio::task::spawn_blocking(move || list_model_dirs(&base, &special_dirs))
            .await
            .map_err(|e| Error::Other(format!("directory scan task failed: {}", e)))
    }

    /// Create `folder_name` under `parent_path` and return the new listing
    ///
    /// The name keeps alphanumerics, `-`, `_` and spaces. An existing folder
    /// is an error and leaves the disk untouched.
    pub async fn create_folder(&self, request: CreateFolderRequest) -> Result<Vec<ModelDirectory>> {
        let folder_name = request
            .folder_name
            .map(|name| sanitize_folder_name(&name))
            .filter(|name| !name.trim().is_empty())
            .ok_or(ValidationError::MissingFolderName)?;
        let parent = checked_relative(request.parent_path.as_deref().unwrap_or(""))?;

        let folder = self.config.models_dir().join(parent).join(&folder_name);
        if tokio::fs::try_exists(&folder).await? {
            return Err(ValidationError::FolderExists { path: folder }.into());
        }

        tokio::fs::create_dir_all(&folder).await?;
        tracing::info!(path = %folder.display(), "created model folder");

        self.list_directories().await
    }

    /// Resolve the file name a download would use and report whether it exists
    ///
    /// `extension` is used when the model name carries none. A name that does
    /// carry one only needs it to be allow-listed.
    pub async fn check_file(&self, request: CheckFileRequest) -> Result<FileCheck> {
        let (model_name, extension) = match (
            request.model_name.filter(|v| !v.is_empty()),
            request.extension.filter(|v| !v.is_empty()),
        ) {
            (Some(model_name), Some(extension)) => (model_name, extension),
            _ => return Err(ValidationError::MissingModelNameOrExtension.into()),
        };
        let save_path = request
            .save_path
            .unwrap_or_else(|| self.config.models.default_save_path.clone());
        let save_dir = checked_relative(&save_path)?;

        let file_name = model_file_name(
            &self.config,
            &model_name,
            &extension,
            ExtensionPolicy::AllowListed,
        )?;
        let relative = save_dir.join(file_name);
        let exists = tokio::fs::try_exists(self.config.models_dir().join(&relative)).await?;

        Ok(FileCheck {
            exists,
            file_path: to_posix(&relative),
        })
    }
}
