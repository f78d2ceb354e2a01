//! Request and response types for the API.

use quickopen_scan::{ScanRequest, UnreadableDirPolicy};
use serde::{Deserialize, Serialize};

/// Query parameters of `GET /api/quickopen`.
///
/// `excludes` and `exclude_paths` may be repeated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuickOpenQuery {
    /// Start directory relative to the root.
    #[serde(default)]
    pub path: Option<String>,
    /// Name globs to hide.
    #[serde(default)]
    pub excludes: Vec<String>,
    /// Directories to prune.
    #[serde(default)]
    pub exclude_paths: Vec<String>,
    /// Cap on returned files.
    #[serde(default)]
    pub max_load: Option<i64>,
    /// Fuzzy filter.
    #[serde(default)]
    pub keyword: Option<String>,
}

impl QuickOpenQuery {
    /// Turns the query into a scan request using the server's defaults.
    pub fn into_request(
        self,
        default_max_load: usize,
        unreadable_dirs: UnreadableDirPolicy,
    ) -> ScanRequest {
        ScanRequest {
            path: self.path,
            excludes: self.excludes,
            exclude_paths: self.exclude_paths,
            max_load: self.max_load,
            default_max_load,
            keyword: self.keyword,
            unreadable_dirs,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
