#![allow(clippy::missing_errors_doc, clippy::uninlined_format_args)]
//! Quick Open Scan - bounded directory listing for file pickers.
//!
//! This crate walks a directory tree once per request and returns every
//! visible file name grouped by its parent directory, relative to the host
//! root. The walk is bounded by a result budget, filtered by exclude globs,
//! pruned by exact directory paths and optionally narrowed by a fuzzy
//! keyword.
//!
//! # Features
//!
//! - Case-sensitive shell globs (`*`, `?`, `[...]`) matched against bare names
//! - Exact-path pruning of whole subtrees
//! - Ordered-subsequence keyword matching on root-relative paths
//! - A global result budget that stops the walk as soon as it is spent
//! - Host visibility rules injected through [`HostPolicy`]
//!
//! # Example
//!
//! ```no_run
//! use quickopen_scan::{FsPolicy, ScanRequest, scan};
//!
//! fn main() -> Result<(), quickopen_scan::ScanError> {
//!     let policy = FsPolicy::new("/path/to/notebooks");
//!     let request = ScanRequest::builder()
//!         .exclude("*.pyc")
//!         .exclude_path("node_modules")
//!         .max_load(500)
//!         .keyword("mn")
//!         .build();
//!
//!     let outcome = scan(&request, &policy)?;
//!     for (dir, names) in outcome.contents.iter() {
//!         println!("{dir}: {}", names.join(", "));
//!     }
//!     Ok(())
//! }
//! ```

mod budget;
mod config;
mod error;
mod filter;
mod matcher;
mod paths;
mod pattern;
mod policy;
mod result;
mod walker;

pub use budget::{DEFAULT_MAX_LOAD, ScanBudget};
pub use config::{ScanRequest, ScanRequestBuilder, UnreadableDirPolicy};
pub use error::{ScanError, ScanResult};
pub use filter::{ExcludeSpec, should_hide};
pub use matcher::{Keyword, matches};
pub use paths::{normalize_path, relative_key};
pub use pattern::GlobPattern;
pub use policy::{DEFAULT_HIDE_GLOBS, FsPolicy, HostPolicy};
pub use result::{ResultTable, ScanOutcome};
pub use walker::{Entry, EntryKind, scan};
