//! Exclusion rules applied to every directory entry.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::pattern::GlobPattern;
use crate::paths::normalize_path;
use crate::policy::HostPolicy;
use crate::walker::Entry;

/// Exclude globs and pruned directories for one scan.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSpec {
    globs: Vec<GlobPattern>,
    pruned: HashSet<PathBuf>,
}

impl ExcludeSpec {
    /// Compiles name globs and collects directories to prune.
    ///
    /// Relative prune paths are resolved against `root`; absolute ones are
    /// kept as given. Both are normalized lexically and compared exactly.
    pub fn new<G, P>(globs: G, prune_paths: P, root: &Path) -> Self
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<Path>,
    {
        Self {
            globs: globs
                .into_iter()
                .map(|g| GlobPattern::new(g.as_ref()))
                .collect(),
            pruned: prune_paths
                .into_iter()
                .map(|p| normalize_path(&root.join(p.as_ref())))
                .collect(),
        }
    }

    /// Whether `name` matches any exclude glob.
    pub fn matches_name(&self, name: &str) -> bool {
        self.globs.iter().any(|g| g.matches(name))
    }

    /// Whether `dir` is one of the directories to prune.
    pub fn is_pruned(&self, dir: &Path) -> bool {
        self.pruned.contains(dir)
    }

    /// The compiled exclude globs.
    pub fn globs(&self) -> &[GlobPattern] {
        &self.globs
    }
}

/// Decides whether an entry must be left out of the results.
///
/// An entry is hidden when its bare name matches an exclude glob, when the
/// host refuses to list the name, or when the host considers the path hidden
/// and hidden entries are not allowed.
pub fn should_hide(entry: &Entry, excludes: &ExcludeSpec, policy: &dyn HostPolicy) -> bool {
    excludes.matches_name(&entry.name)
        || !policy.should_list(&entry.name)
        || (policy.is_hidden(&entry.path) && !policy.allow_hidden())
}
