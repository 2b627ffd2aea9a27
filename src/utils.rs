//! Utility functions for name sanitization and path manipulation

use crate::error::ValidationError;
use std::path::{Component, Path, PathBuf};

const BYTES_PER_MEBIBYTE: f64 = 1024.0 * 1024.0;

/// Strip a model name down to alphanumerics, `-` and `_`
///
/// With `keep_dot` the `.` character survives as well, which is how a name
/// that already carries its extension keeps it.
///
/// # Examples
///
/// ```
/// use model_dl::utils::sanitize_model_name;
///
/// assert_eq!(sanitize_model_name("my lora (v2)!", false), "mylorav2");
/// assert_eq!(sanitize_model_name("detail-tweaker_1.0.pt", true), "detail-tweaker_1.0.pt");
/// ```
pub fn sanitize_model_name(name: &str, keep_dot: bool) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || (keep_dot && *c == '.'))
        .collect()
}

/// Strip a folder name down to alphanumerics, `-`, `_` and spaces
pub fn sanitize_folder_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect()
}

/// Lower-cased extension of the final path component, with its leading dot
///
/// A leading dot on the file name does not start an extension, so `".bin"`
/// has none. A trailing dot yields `"."`.
pub fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Extension of the last segment of a URL path, ignoring query and fragment
pub fn url_extension(raw: &str) -> Result<Option<String>, ValidationError> {
    let parsed = url::Url::parse(raw).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    let last_segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    Ok(file_extension(last_segment))
}

/// Validate a client-supplied path that must stay inside the models directory
///
/// Absolute paths and `..` components are rejected. The empty string is the
/// models directory itself.
pub fn checked_relative(relative: &str) -> Result<PathBuf, ValidationError> {
    let mut cleaned = PathBuf::new();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => cleaned.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ValidationError::InvalidPath(relative.to_string()));
            }
        }
    }

    Ok(cleaned)
}

/// Render a relative path with `/` separators regardless of platform
pub fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Format a byte count as mebibytes with one decimal, e.g. `"100.0MB"`
pub fn format_mebibytes(bytes: u64) -> String {
    format!("{:.1}MB", bytes as f64 / BYTES_PER_MEBIBYTE)
}
