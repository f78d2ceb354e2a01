//! Bounded depth-first directory walk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::budget::ScanBudget;
use crate::config::{ScanRequest, UnreadableDirPolicy};
use crate::error::{ScanError, ScanResult};
use crate::filter::{ExcludeSpec, should_hide};
use crate::matcher::Keyword;
use crate::paths::{normalize_path, relative_key};
use crate::policy::HostPolicy;
use crate::result::{ResultTable, ScanOutcome};

/// Kind of a directory entry, with symlinks resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, fifos and devices. Never listed.
    Other,
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// One item produced while reading a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path of the item.
    pub path: PathBuf,

    /// Base name of the item.
    pub name: String,

    /// Whether the item is a file or a directory.
    pub kind: EntryKind,
}

impl Entry {
    /// Creates an entry, taking the name from the last path component.
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Self { path, name, kind }
    }

    /// The walk follows links, so the file type is already the target's.
    fn from_dir_entry(entry: &walkdir::DirEntry) -> Self {
        Self {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_string_lossy().to_string(),
            kind: EntryKind::from(entry.file_type()),
        }
    }
}

/// Signal returned by a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// The budget ran out with entries left unexamined.
    Exhausted,
}

/// State of one walk. Owned by a single call to [`scan`] and never shared.
struct Scanner<'a> {
    root: &'a Path,
    excludes: &'a ExcludeSpec,
    keyword: Option<&'a Keyword>,
    policy: &'a dyn HostPolicy,
    on_unreadable: UnreadableDirPolicy,
    budget: ScanBudget,
    table: ResultTable,
}

impl<'a> Scanner<'a> {
    fn new(
        root: &'a Path,
        excludes: &'a ExcludeSpec,
        keyword: Option<&'a Keyword>,
        policy: &'a dyn HostPolicy,
        on_unreadable: UnreadableDirPolicy,
        budget: ScanBudget,
    ) -> Self {
        Self {
            root,
            excludes,
            keyword,
            policy,
            on_unreadable,
            budget,
            table: ResultTable::new(),
        }
    }

    fn walk(&mut self, start: &Path) -> ScanResult<Flow> {
        if self.excludes.is_pruned(start) {
            debug!("Pruned excluded directory: {}", start.display());
            return Ok(Flow::Continue);
        }

        let excludes = self.excludes;
        let policy = self.policy;
        let entries = WalkDir::new(start)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_excluded(e, excludes, policy));

        for next in entries {
            let next = match next {
                Ok(entry) if entry.depth() == 0 => continue,
                other => other,
            };

            if self.budget.is_exhausted() {
                return Ok(Flow::Exhausted);
            }

            match next {
                Ok(entry) => {
                    let entry = Entry::from_dir_entry(&entry);
                    if entry.kind == EntryKind::File {
                        self.visit_file(&entry);
                    }
                }
                Err(e) => self.walk_error(start, e)?,
            }
        }

        Ok(Flow::Continue)
    }

    fn visit_file(&mut self, entry: &Entry) {
        if let Some(keyword) = self.keyword
            && !keyword.matches(&relative_key(&entry.path, self.root))
        {
            return;
        }

        if self.budget.try_consume() {
            self.table.record(entry, self.root);
        }
    }

    /// Sorts a walk error into cycles and dangling links, which are dropped,
    /// and read failures, which go through the unreadable-directory policy.
    fn walk_error(&self, start: &Path, error: walkdir::Error) -> ScanResult<()> {
        let path = error.path().unwrap_or(start).to_path_buf();

        if let Some(ancestor) = error.loop_ancestor() {
            debug!(
                "Skipping directory cycle at {} (back to {})",
                path.display(),
                ancestor.display()
            );
            return Ok(());
        }

        if path != start && is_dangling_link(&path) {
            debug!("Ignoring dangling symlink: {}", path.display());
            return Ok(());
        }

        let is_start = error.path() == Some(start);
        self.unreadable(&path, is_start, io::Error::from(error))
    }

    /// Applies the unreadable-directory policy. The start directory always
    /// fails the scan.
    fn unreadable(&self, dir: &Path, is_start: bool, error: io::Error) -> ScanResult<()> {
        if is_start || self.on_unreadable == UnreadableDirPolicy::Fail {
            return Err(ScanError::read_directory(dir, error));
        }

        warn!("Skipping unreadable directory '{}': {}", dir.display(), error);
        Ok(())
    }
}

/// Whether a walked entry is hidden or, for directories, pruned.
fn is_excluded(entry: &walkdir::DirEntry, excludes: &ExcludeSpec, policy: &dyn HostPolicy) -> bool {
    if entry.file_type().is_dir() && excludes.is_pruned(entry.path()) {
        debug!("Pruned excluded directory: {}", entry.path().display());
        return true;
    }

    should_hide(&Entry::from_dir_entry(entry), excludes, policy)
}

fn is_dangling_link(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
        && fs::metadata(path).is_err()
}

/// Scans the tree described by `request` under the host's root directory.
///
/// Returns every visible file name grouped by parent directory relative to
/// the root, along with the elapsed time and whether the result budget cut
/// the walk short.
pub fn scan(request: &ScanRequest, policy: &dyn HostPolicy) -> ScanResult<ScanOutcome> {
    let root = normalize_path(policy.root_dir());
    let start = request.resolve_start(&root)?;

    let metadata = fs::metadata(&start).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanError::start_not_found(&start),
        _ => ScanError::read_directory(&start, e),
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::not_a_directory(&start));
    }

    let excludes = ExcludeSpec::new(&request.excludes, &request.exclude_paths, &root);
    let keyword = Keyword::parse(request.keyword.as_deref());
    let budget = ScanBudget::from_max_load(request.max_load, request.default_max_load);

    debug!(
        "Scanning {} (max_load={}, excludes={}, keyword={:?})",
        start.display(),
        budget.limit(),
        excludes.globs().len(),
        keyword.as_ref().map(Keyword::as_str)
    );

    let started = Instant::now();
    let mut scanner = Scanner::new(
        &root,
        &excludes,
        keyword.as_ref(),
        policy,
        request.unreadable_dirs,
        budget,
    );
    let flow = scanner.walk(&start)?;
    let scan_seconds = started.elapsed().as_secs_f64();

    let outcome = ScanOutcome {
        scan_seconds,
        contents: scanner.table,
        truncated: flow == Flow::Exhausted,
    };

    info!(
        "Scanned {} in {:.3}s: {} files in {} directories{}",
        start.display(),
        outcome.scan_seconds,
        outcome.total_files(),
        outcome.contents.len(),
        if outcome.truncated { " (truncated)" } else { "" }
    );

    Ok(outcome)
}
