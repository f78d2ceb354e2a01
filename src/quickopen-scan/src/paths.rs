//! Path helpers shared by the walker, the aggregator and host policies.

use std::path::{Component, Path, PathBuf};

/// Normalizes a path by resolving `.` and `..` components without
/// filesystem access.
///
/// `..` at the start of a relative path is kept; `..` above the root of an
/// absolute path is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped && !path.is_absolute() {
                    normalized.push("..");
                }
            }
            Component::CurDir => {}
            comp => normalized.push(comp),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }

    normalized
}

/// Renders `path` relative to `root` with `/` separators.
///
/// The root itself renders as `"."`. A path that is not under `root` is
/// rendered in full.
pub fn relative_key(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => {
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect();
            if parts.is_empty() {
                ".".to_string()
            } else {
                parts.join("/")
            }
        }
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}
