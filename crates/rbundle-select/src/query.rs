use camino::Utf8Path;
use regex::{Regex, RegexBuilder};
use std::fs;

use rbundle_utils::error::BundleError;

/// Case-insensitive matcher built from the `--query` value.
///
/// - empty query: no patterns, every document scores zero hits;
/// - literal mode: one escaped pattern per whitespace-separated term;
/// - regex mode: the whole query is a single pattern.
#[derive(Debug, Clone, Default)]
pub struct QueryMatcher {
    patterns: Vec<Regex>,
}

impl QueryMatcher {
    /// Compile the query.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::InvalidPattern`] when `as_regex` is set and the
    /// query does not compile.
    pub fn new(query: &str, as_regex: bool) -> Result<Self, BundleError> {
        if query.is_empty() {
            return Ok(Self::default());
        }

        let patterns = if as_regex {
            vec![compile(query, query)?]
        } else {
            query
                .split_whitespace()
                .map(|term| compile(&regex::escape(term), query))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self { patterns })
    }

    /// Whether any pattern is active. A whitespace-only literal query has
    /// none.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Total non-overlapping matches of every pattern in `text`.
    #[must_use]
    pub fn count_hits(&self, text: &str) -> usize {
        self.patterns
            .iter()
            .map(|pattern| pattern.find_iter(text).count())
            .sum()
    }

    /// Count hits in a file. Read failures score zero rather than failing
    /// the run; invalid UTF-8 bytes are dropped before matching.
    #[must_use]
    pub fn count_file_hits(&self, path: &Utf8Path) -> usize {
        if !self.is_active() {
            return 0;
        }

        match fs::read(path) {
            Ok(bytes) => self.count_hits(&decode_ignoring_invalid(&bytes)),
            Err(e) => {
                tracing::warn!(%path, error = %e, "unreadable document scored as zero hits");
                0
            }
        }
    }
}

/// Decode UTF-8, discarding invalid byte sequences instead of replacing them.
fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

fn compile(pattern: &str, query: &str) -> Result<Regex, BundleError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| BundleError::InvalidPattern {
            pattern: query.to_string(),
            reason: e.to_string(),
        })
}
