//! Host visibility rules.

use std::path::{Component, Path, PathBuf};

use crate::pattern::GlobPattern;
use crate::paths::normalize_path;

/// Names a notebook-style host never lists.
pub const DEFAULT_HIDE_GLOBS: &[&str] = &[
    "__pycache__",
    "*.pyc",
    "*.pyo",
    ".DS_Store",
    "*.so",
    "*.dylib",
    "*~",
];

/// Visibility rules supplied by the host that owns the root directory.
///
/// Implementations are shared read-only across concurrent scans.
pub trait HostPolicy: Send + Sync {
    /// The directory every scan is rooted at. Result keys are relative to it.
    fn root_dir(&self) -> &Path;

    /// Whether an entry with this bare name may be listed at all.
    fn should_list(&self, name: &str) -> bool;

    /// Whether the entry at `path` counts as hidden.
    fn is_hidden(&self, path: &Path) -> bool;

    /// Whether hidden entries may be shown.
    fn allow_hidden(&self) -> bool;
}

/// Policy backed by a list of hide globs and a dot-file rule.
#[derive(Debug, Clone)]
pub struct FsPolicy {
    root: PathBuf,
    hide_globs: Vec<GlobPattern>,
    allow_hidden: bool,
}

impl FsPolicy {
    /// Creates a policy for `root` with [`DEFAULT_HIDE_GLOBS`] and hidden
    /// files disallowed.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: normalize_path(&root.into()),
            hide_globs: DEFAULT_HIDE_GLOBS
                .iter()
                .map(|g| GlobPattern::new(g))
                .collect(),
            allow_hidden: false,
        }
    }

    /// Replaces the hide globs.
    pub fn with_hide_globs(mut self, globs: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        self.hide_globs = globs
            .into_iter()
            .map(|g| GlobPattern::new(g.as_ref()))
            .collect();
        self
    }

    /// Sets whether hidden entries may be shown.
    pub fn with_allow_hidden(mut self, allow: bool) -> Self {
        self.allow_hidden = allow;
        self
    }
}

impl HostPolicy for FsPolicy {
    fn root_dir(&self) -> &Path {
        &self.root
    }

    fn should_list(&self, name: &str) -> bool {
        !self.hide_globs.iter().any(|g| g.matches(name))
    }

    /// Only components below the root are inspected, so a root that itself
    /// lives inside a dot directory does not hide everything.
    fn is_hidden(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative.components().any(|c| match c {
            Component::Normal(name) => name.to_string_lossy().starts_with('.'),
            _ => false,
        })
    }

    fn allow_hidden(&self) -> bool {
        self.allow_hidden
    }
}
