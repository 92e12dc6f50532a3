//! Canonical names excluded from every result.

use std::collections::HashSet;
use std::path::Path;

/// Set of canonical (lowercase) names to drop silently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    names: HashSet<String>,
}

impl Blacklist {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a line-delimited list. Blank lines and `#` comments are ignored;
    /// entries are trimmed and lowercased.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// Read the blacklist file. A missing or unreadable file yields an empty
    /// blacklist and a warning; it never fails the run.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let list = Self::parse(&text);
                tracing::debug!(path = %path.display(), entries = list.len(), "loaded blacklist");
                list
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "blacklist unavailable, using empty set");
                Self::empty()
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Blacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }
}
