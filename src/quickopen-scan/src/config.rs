//! Request types for a scan.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::budget::DEFAULT_MAX_LOAD;
use crate::error::{ScanError, ScanResult};
use crate::paths::normalize_path;

/// What to do with a subdirectory that cannot be read mid-walk.
///
/// The start directory is always required to be readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadableDirPolicy {
    /// Log the failure and continue with the next sibling.
    #[default]
    Skip,

    /// Abort the whole scan with the read error.
    Fail,
}

/// Parameters of one quick-open scan.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Subdirectory of the root to start from. `None` or empty means the root.
    pub path: Option<String>,

    /// Name globs to hide.
    pub excludes: Vec<String>,

    /// Directories to prune, absolute or relative to the root.
    pub exclude_paths: Vec<String>,

    /// Cap on returned files. Absent or non-positive means `default_max_load`.
    pub max_load: Option<i64>,

    /// Cap used when `max_load` does not give one.
    pub default_max_load: usize,

    /// Fuzzy filter; whitespace is ignored.
    pub keyword: Option<String>,

    /// Handling of unreadable subdirectories.
    pub unreadable_dirs: UnreadableDirPolicy,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            path: None,
            excludes: Vec::new(),
            exclude_paths: Vec::new(),
            max_load: None,
            default_max_load: DEFAULT_MAX_LOAD,
            keyword: None,
            unreadable_dirs: UnreadableDirPolicy::default(),
        }
    }
}

impl ScanRequest {
    /// Creates a builder for constructing a request.
    pub fn builder() -> ScanRequestBuilder {
        ScanRequestBuilder::new()
    }

    /// Resolves the start directory under `root`.
    ///
    /// The result is normalized lexically and must stay inside `root`.
    pub fn resolve_start(&self, root: &Path) -> ScanResult<PathBuf> {
        let root = normalize_path(root);
        let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) else {
            return Ok(root);
        };

        let start = normalize_path(&root.join(path));
        if !start.starts_with(&root) {
            return Err(ScanError::outside_root(path));
        }
        Ok(start)
    }
}

/// Builder for creating `ScanRequest` instances.
#[derive(Debug, Default)]
pub struct ScanRequestBuilder {
    request: ScanRequest,
}

impl ScanRequestBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subdirectory to start from.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.request.path = Some(path.into());
        self
    }

    /// Sets the exclude globs.
    pub fn excludes(mut self, globs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.request.excludes = globs.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a single exclude glob.
    pub fn exclude(mut self, glob: impl Into<String>) -> Self {
        self.request.excludes.push(glob.into());
        self
    }

    /// Sets the directories to prune.
    pub fn exclude_paths(mut self, paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.request.exclude_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a single directory to prune.
    pub fn exclude_path(mut self, path: impl Into<String>) -> Self {
        self.request.exclude_paths.push(path.into());
        self
    }

    /// Sets the result cap.
    pub fn max_load(mut self, max_load: i64) -> Self {
        self.request.max_load = Some(max_load);
        self
    }

    /// Sets the cap used when no positive `max_load` is given.
    pub fn default_max_load(mut self, max_load: usize) -> Self {
        self.request.default_max_load = max_load;
        self
    }

    /// Sets the fuzzy keyword.
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.request.keyword = Some(keyword.into());
        self
    }

    /// Sets how unreadable subdirectories are handled.
    pub fn unreadable_dirs(mut self, policy: UnreadableDirPolicy) -> Self {
        self.request.unreadable_dirs = policy;
        self
    }

    /// Builds the request.
    pub fn build(self) -> ScanRequest {
        self.request
    }
}
