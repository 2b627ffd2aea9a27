//! Target file name resolution shared by downloads and existence checks

use crate::config::Config;
use crate::error::ValidationError;
use crate::utils::{file_extension, sanitize_model_name};

/// How an extension carried by the model name relates to the reference one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExtensionPolicy {
    /// Must be allow-listed and equal to the reference (the URL's extension)
    MatchReference,
    /// Only has to be allow-listed
    AllowListed,
}

/// Build the on-disk file name for `model_name`
///
/// A name that carries an allow-listed extension keeps it (dots survive
/// sanitization). Otherwise the sanitized name gets `reference_ext` appended,
/// which must itself be allow-listed.
pub(crate) fn model_file_name(
    config: &Config,
    model_name: &str,
    reference_ext: &str,
    policy: ExtensionPolicy,
) -> Result<String, ValidationError> {
    let reference_ext = reference_ext.to_lowercase();

    match file_extension(model_name) {
        Some(model_ext) => {
            if !config.is_supported_extension(&model_ext) {
                return Err(ValidationError::InvalidExtension {
                    extension: model_ext,
                    supported: config.supported_extensions_display(),
                });
            }
            if policy == ExtensionPolicy::MatchReference && model_ext != reference_ext {
                return Err(ValidationError::ExtensionMismatch {
                    url: reference_ext,
                    model: model_ext,
                });
            }

            let name = sanitize_model_name(model_name, true);
            // "!!.pt" would otherwise become the extension-less ".pt"
            if file_extension(&name).as_deref() != Some(model_ext.as_str()) {
                return Err(ValidationError::EmptyModelName);
            }
            Ok(name)
        }
        None => {
            if !config.is_supported_extension(&reference_ext) {
                return Err(ValidationError::InvalidExtension {
                    extension: reference_ext,
                    supported: config.supported_extensions_display(),
                });
            }

            let stem = sanitize_model_name(model_name, false);
            if stem.is_empty() {
                return Err(ValidationError::EmptyModelName);
            }
            Ok(stem + &reference_ext)
        }
    }
}
