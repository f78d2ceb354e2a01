//! Scan result types.

use std::path::Path;

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::Serialize;

use crate::paths::relative_key;
use crate::walker::Entry;

/// File names grouped by parent directory relative to the root.
///
/// Keys keep the order in which their first file was found and names keep
/// traversal order. Files directly under the root are grouped under `"."`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    groups: IndexMap<String, Vec<String>>,
}

impl ResultTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry`'s name under its parent directory, relative to `root`.
    pub fn record(&mut self, entry: &Entry, root: &Path) {
        let parent = entry.path.parent().unwrap_or(root);
        self.groups
            .entry(relative_key(parent, root))
            .or_default()
            .push(entry.name.clone());
    }

    /// Names recorded under `dir`, if any.
    pub fn get(&self, dir: &str) -> Option<&[String]> {
        self.groups.get(dir).map(Vec::as_slice)
    }

    /// Iterates over `(directory, names)` groups in insertion order.
    pub fn iter(&self) -> Iter<'_, String, Vec<String>> {
        self.groups.iter()
    }

    /// Number of directories with at least one file.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns whether no file was recorded.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of file names across all directories.
    pub fn total_files(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Consumes the table, returning the underlying map.
    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.groups
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Everything a scan reports back.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// Wall-clock time spent walking, in seconds.
    pub scan_seconds: f64,

    /// File names grouped by relative parent directory.
    pub contents: ResultTable,

    /// Whether the walk stopped on the result budget with entries left
    /// unexamined.
    pub truncated: bool,
}

impl ScanOutcome {
    /// Total number of file names in the outcome.
    pub fn total_files(&self) -> usize {
        self.contents.total_files()
    }
}
