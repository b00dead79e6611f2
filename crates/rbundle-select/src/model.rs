use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};

/// A discovered file that passed the extension and age filters.
///
/// Built during enumeration and never mutated afterwards, except for
/// `out_name` which may be rewritten once to keep names unique within a
/// bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Absolute path of the source document
    pub source: Utf8PathBuf,
    /// Path relative to the repo root (used for naming and display)
    pub relative: Utf8PathBuf,
    /// Last modification time
    pub mtime: DateTime<Utc>,
    /// `mtime` as fractional seconds since the Unix epoch (sort key)
    pub mtime_secs: f64,
    /// Age in days relative to the run time, never negative
    pub age_days: f64,
    /// Total query matches in the document
    pub hits: usize,
    /// `hits * 100 + recency * 10`
    pub score: f64,
    /// Flattened file name inside the bundle directory
    pub out_name: String,
}

/// Counters collected while scanning the research directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Regular files visited under the research directory
    pub visited: usize,
    /// Files that passed the exclude, extension and age filters
    pub admitted: usize,
    /// Admitted files left after the zero-hit filter
    pub matched: usize,
    /// Files kept after truncation to the limit
    pub selected: usize,
}

/// Ranked, truncated result of one selection run.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub candidates: Vec<Candidate>,
    pub stats: ScanStats,
}

impl Selection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}
