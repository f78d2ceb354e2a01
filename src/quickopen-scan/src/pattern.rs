//! Shell-style glob patterns matched against bare file names.

use glob::Pattern;

/// A compiled name glob.
///
/// Matching is case-sensitive. A pattern the glob syntax rejects, such as a
/// `[` that is never closed, is matched literally, so every pattern compiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    source: String,
    /// `None` when the pattern is matched as a literal name.
    pattern: Option<Pattern>,
}

impl GlobPattern {
    /// Compiles a pattern.
    pub fn new(pattern: &str) -> Self {
        let compiled = Pattern::new(pattern)
            .inspect_err(|e| tracing::debug!("Treating glob {:?} literally: {}", pattern, e))
            .ok();

        Self {
            source: pattern.to_string(),
            pattern: compiled,
        }
    }

    /// Returns the pattern text this glob was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Checks whether `name` matches the whole pattern.
    pub fn matches(&self, name: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.matches(name),
            None => name == self.source,
        }
    }
}
