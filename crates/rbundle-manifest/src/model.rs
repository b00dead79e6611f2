use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use rbundle_select::Candidate;

/// Parameters of the run, echoed into the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    pub query: String,
    pub regex: bool,
    pub days: i64,
    pub limit: i64,
    /// Research directory exactly as the user gave it (not resolved)
    pub research_dir: String,
}

/// Machine-readable bundle description (`manifest.json`).
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub created_at: String,
    pub query: String,
    pub regex: bool,
    pub days: i64,
    pub limit: i64,
    pub research_dir: String,
    pub selected: Vec<ManifestEntry>,
}

/// One copied document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub source: String,
    pub relative: String,
    pub out: String,
    pub mtime: String,
    /// Rounded to 2 decimals
    pub age_days: f64,
    pub hits: usize,
    /// Rounded to 3 decimals
    pub score: f64,
}

impl Manifest {
    #[must_use]
    pub fn new(created_at: DateTime<Utc>, params: &RunParams, selected: &[Candidate]) -> Self {
        Self {
            created_at: format_timestamp(created_at),
            query: params.query.clone(),
            regex: params.regex,
            days: params.days,
            limit: params.limit,
            research_dir: display_path(&params.research_dir),
            selected: selected.iter().map(ManifestEntry::from).collect(),
        }
    }
}

impl From<&Candidate> for ManifestEntry {
    fn from(candidate: &Candidate) -> Self {
        Self {
            source: candidate.source.to_string(),
            relative: candidate.relative.to_string(),
            out: candidate.out_name.clone(),
            mtime: format_timestamp(candidate.mtime),
            age_days: round_to(candidate.age_days, 2),
            hits: candidate.hits,
            score: round_to(candidate.score, 3),
        }
    }
}

/// RFC 3339 in UTC with microseconds and an explicit `+00:00` offset.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Round through decimal formatting so halfway cases follow the exact
/// binary value rather than a scaled multiply.
#[must_use]
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Lexically tidy a user-supplied path: drop `.` components and trailing
/// separators, keep everything else as given.
fn display_path(raw: &str) -> String {
    let path = Utf8Path::new(raw);
    let tidy: Utf8PathBuf = path
        .components()
        .filter(|c| !matches!(c, Utf8Component::CurDir))
        .collect();

    if tidy.as_str().is_empty() {
        ".".to_string()
    } else {
        tidy.into_string()
    }
}
