//! Search text normalization.

use std::fmt;

/// Free text typed by the user, trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trims `raw` and wraps it, or returns `None` if nothing is left.
    ///
    /// ```
    /// use map_search::geocode::SearchQuery;
    ///
    /// assert_eq!(SearchQuery::parse("  Paris ").unwrap().as_str(), "Paris");
    /// assert!(SearchQuery::parse(" \t\n").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The trimmed text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
