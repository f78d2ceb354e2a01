//! Ordered-subsequence keyword matching.

/// A normalized fuzzy keyword.
///
/// Whitespace is stripped and the remaining characters are lowercased once
/// up front so each candidate costs a single linear pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    text: String,
    folded: Vec<char>,
}

impl Keyword {
    /// Builds a keyword from raw user input.
    ///
    /// Returns `None` when the input is absent or contains only whitespace,
    /// which means "no filter".
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let text: String = raw?.chars().filter(|c| !c.is_whitespace()).collect();
        if text.is_empty() {
            return None;
        }

        let folded = text.chars().flat_map(char::to_lowercase).collect();
        Some(Self { text, folded })
    }

    /// The keyword with whitespace removed, before case folding.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Checks whether every keyword character occurs in `candidate` in the
    /// same order, ignoring case.
    ///
    /// Each keyword character consumes the earliest remaining occurrence in
    /// the candidate; nothing is revisited.
    pub fn matches(&self, candidate: &str) -> bool {
        let mut needle = self.folded.iter().peekable();

        for c in candidate.chars().flat_map(char::to_lowercase) {
            match needle.peek() {
                Some(&&wanted) if wanted == c => {
                    needle.next();
                }
                Some(_) => {}
                None => return true,
            }
        }

        needle.peek().is_none()
    }
}

/// Checks whether `keyword` is an ordered subsequence of `candidate`,
/// ignoring case and whitespace in the keyword.
///
/// An empty keyword matches every candidate.
pub fn matches(keyword: &str, candidate: &str) -> bool {
    Keyword::parse(Some(keyword)).is_none_or(|k| k.matches(candidate))
}
