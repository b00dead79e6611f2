use camino::Utf8Path;
use chrono::{DateTime, Utc};
use globset::GlobSet;
use std::collections::BTreeSet;
use std::fs;
use walkdir::WalkDir;

use rbundle_selectors::{
    DEFAULT_DAYS, DEFAULT_EXTENSIONS, DEFAULT_LIMIT, extension_allowed, parse_extensions,
};
use rbundle_utils::paths::relative_to_root;

use crate::model::{Candidate, ScanStats, Selection};
use crate::naming::{dedupe_out_names, flat_name};
use crate::query::QueryMatcher;
use crate::score;

/// Enumerates, scores and ranks research documents.
///
/// Configured with builder-style setters and then run once per research
/// directory:
///
/// ```ignore
/// let selection = CandidateSelector::new(QueryMatcher::new("irsa s3", false)?)
///     .days(180)
///     .limit(20)
///     .select(&research_dir, &repo_root, Utc::now());
/// ```
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    matcher: QueryMatcher,
    extensions: BTreeSet<String>,
    exclude: GlobSet,
    days: i64,
    limit: i64,
}

impl CandidateSelector {
    #[must_use]
    pub fn new(matcher: QueryMatcher) -> Self {
        Self {
            matcher,
            extensions: parse_extensions(DEFAULT_EXTENSIONS),
            exclude: GlobSet::empty(),
            days: DEFAULT_DAYS,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Lowercased extensions without leading dots.
    #[must_use]
    pub fn extensions(mut self, extensions: BTreeSet<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Globs matched against paths relative to the research directory.
    #[must_use]
    pub fn exclude(mut self, exclude: GlobSet) -> Self {
        self.exclude = exclude;
        self
    }

    #[must_use]
    pub fn days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    /// Values `<= 0` select nothing.
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Run the full pipeline: enumerate, score, filter, rank, truncate.
    ///
    /// `now` is the single reference instant for ages and the cutoff.
    #[must_use]
    pub fn select(
        &self,
        research_dir: &Utf8Path,
        repo_root: &Utf8Path,
        now: DateTime<Utc>,
    ) -> Selection {
        let (mut candidates, mut stats) = self.scan(research_dir, repo_root, now);

        if self.matcher.is_active() {
            candidates.retain(|c| c.hits > 0);
        }
        stats.matched = candidates.len();

        rank(&mut candidates, self.limit);
        dedupe_out_names(&mut candidates);
        stats.selected = candidates.len();

        tracing::info!(
            visited = stats.visited,
            admitted = stats.admitted,
            matched = stats.matched,
            selected = stats.selected,
            "selection complete"
        );

        Selection { candidates, stats }
    }

    /// Enumerate and score every admissible file, in sorted path order.
    ///
    /// Directory walk errors and non-UTF-8 paths are logged and skipped.
    #[must_use]
    pub fn scan(
        &self,
        research_dir: &Utf8Path,
        repo_root: &Utf8Path,
        now: DateTime<Utc>,
    ) -> (Vec<Candidate>, ScanStats) {
        let now_secs = score::epoch_seconds(now);
        let cutoff = score::cutoff_seconds(now_secs, self.days);
        let mut stats = ScanStats::default();
        let mut candidates = Vec::new();

        let walker = WalkDir::new(research_dir)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            let Some(path) = Utf8Path::from_path(entry.path()) else {
                tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 path");
                continue;
            };

            // Follow symlinks when classifying so linked documents are kept.
            let metadata = match fs::metadata(path) {
                Ok(m) if m.is_file() => m,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(%path, error = %e, "skipping entry without metadata");
                    continue;
                }
            };
            stats.visited += 1;

            if self.is_excluded(research_dir, path) {
                tracing::trace!(%path, "excluded by glob");
                continue;
            }
            if !extension_allowed(path, &self.extensions) {
                continue;
            }

            let mtime: DateTime<Utc> = match metadata.modified() {
                Ok(t) => t.into(),
                Err(e) => {
                    tracing::warn!(%path, error = %e, "skipping file without modification time");
                    continue;
                }
            };
            let mtime_secs = score::epoch_seconds(mtime);
            if mtime_secs < cutoff {
                tracing::trace!(%path, "older than window");
                continue;
            }

            let age_days = score::age_days(now_secs, mtime_secs);
            let hits = self.matcher.count_file_hits(path);
            let recency = score::recency(age_days, self.days);
            let relative = relative_to_root(path, repo_root, research_dir);
            let out_name = flat_name(&relative);

            tracing::debug!(%relative, hits, age_days, "candidate");

            candidates.push(Candidate {
                source: path.to_path_buf(),
                relative,
                mtime,
                mtime_secs,
                age_days,
                hits,
                score: score::score(hits, recency),
                out_name,
            });
        }

        stats.admitted = candidates.len();
        (candidates, stats)
    }

    fn is_excluded(&self, research_dir: &Utf8Path, path: &Utf8Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let rel = path.strip_prefix(research_dir).unwrap_or(path);
        self.exclude.is_match(rel)
    }
}

/// Stable sort by `(score, mtime)` descending, then keep the first `limit`.
pub fn rank(candidates: &mut Vec<Candidate>, limit: i64) {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.mtime_secs.total_cmp(&a.mtime_secs))
    });
    let keep = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
    candidates.truncate(keep);
}
