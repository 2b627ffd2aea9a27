//! Model directory enumeration
//!
//! Walks the models directory and produces the flat, ordered listing the
//! folder picker shows: the root, then the well-known folders in declared
//! order, then everything else sorted case-insensitively.

use crate::types::ModelDirectory;
use crate::utils::to_posix;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Display name of the models directory itself
pub const ROOT_DISPLAY_NAME: &str = "models";

/// List every directory under `base`, special folders first
///
/// `special_dirs` are relative paths. The root is always listed; a special
/// folder only when it is a directory on disk. Symlinked directories are not
/// followed, so a link cycle cannot loop the walk. There is no depth limit.
/// Entries that cannot be read are skipped.
pub fn list_model_dirs(base: &Path, special_dirs: &[String]) -> Vec<ModelDirectory> {
    let mut listing = vec![ModelDirectory {
        path: String::new(),
        name: ROOT_DISPLAY_NAME.to_string(),
        special: true,
    }];

    let mut seen: HashSet<&str> = HashSet::from([""]);
    for dir in special_dirs {
        if seen.contains(dir.as_str()) || !base.join(dir).is_dir() {
            continue;
        }
        seen.insert(dir.as_str());
        listing.push(ModelDirectory {
            path: dir.clone(),
            name: dir.clone(),
            special: true,
        });
    }

    let mut others: Vec<ModelDirectory> = WalkDir::new(base)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry in models directory");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(base).ok()?;
            let path = to_posix(relative);
            if special_dirs.iter().any(|s| *s == path) {
                return None;
            }
            Some(ModelDirectory {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                special: false,
            })
        })
        .collect();

    others.sort_by_cached_key(|d| d.path.to_lowercase());
    listing.extend(others);
    listing
}
