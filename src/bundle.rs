//! Bundle creation: resolve directories, select, copy, summarize.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local, Utc};
use std::fs::{self, File, FileTimes};
use std::io::{self, Read};

use rbundle_config::Config;
use rbundle_manifest::{BundleOutputs, Manifest, RunParams, write_outputs};
use rbundle_select::{CandidateSelector, QueryMatcher, Selection};
use rbundle_selectors::parse_extensions;
use rbundle_utils::error::BundleError;
use rbundle_utils::paths::{absolutize, canonicalize_utf8, ensure_dir_all};
use rbundle_utils::slug::bundle_slug;

/// Timestamp prefix of bundle directory names (local time).
const DIR_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Everything needed to build one bundle.
#[derive(Debug, Clone)]
pub struct BundleRequest {
    /// Raw query; empty means "no keyword filter".
    pub query: String,
    /// Treat `query` as one regular expression instead of literal terms.
    pub regex: bool,
    /// Explicit bundle name; empty derives the slug from the query.
    pub name: String,
    /// Layered settings: days, limit, directories, extensions, excludes.
    pub config: Config,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Absolute bundle directory
    pub bundle_dir: Utf8PathBuf,
    pub slug: String,
    pub selection: Selection,
    pub outputs: BundleOutputs,
}

/// Run the whole pipeline relative to `cwd`.
///
/// `cwd` is the repo root: relative `research_dir` and `out` values resolve
/// against it, and manifest `relative` paths are computed from it. `now` is
/// the single reference instant for ages, the cutoff, `createdAt`, and the
/// directory timestamp.
///
/// # Errors
///
/// - [`BundleError::InvalidPattern`] for a `regex` query that does not compile
/// - [`BundleError::Config`] for an invalid exclude glob
/// - [`BundleError::ResearchDirNotFound`] when the research directory is
///   missing or not a directory
/// - I/O variants when the bundle cannot be created or written
pub fn create_bundle(
    request: &BundleRequest,
    cwd: &Utf8Path,
    now: DateTime<Utc>,
) -> Result<BundleReport, BundleError> {
    let config = &request.config;

    let matcher = QueryMatcher::new(&request.query, request.regex)?;
    let exclude = config.selectors.build_exclude_set()?;
    let extensions = parse_extensions(&config.ext);
    if extensions.is_empty() {
        tracing::warn!(ext = %config.ext, "extension list is empty; no files will be selected");
    }

    let repo_root = canonicalize_utf8(cwd)?;
    let research_dir = resolve_research_dir(&repo_root, &config.research_dir)?;
    let out_root = absolutize(&repo_root, Utf8Path::new(&config.out));
    tracing::debug!(%repo_root, %research_dir, %out_root, "resolved directories");

    let mut selection = CandidateSelector::new(matcher)
        .extensions(extensions)
        .exclude(exclude)
        .days(config.days)
        .limit(config.limit)
        .select(&research_dir, &repo_root, now);

    let slug = bundle_slug(&request.name, &request.query);
    let timestamp = now.with_timezone(&Local).format(DIR_TIMESTAMP_FORMAT);
    let bundle_dir = out_root.join(format!("{timestamp}__{slug}"));

    ensure_dir_all(&bundle_dir).map_err(|e| BundleError::OutputWriteFailed {
        path: bundle_dir.to_string(),
        reason: e.to_string(),
    })?;

    copy_selected(&mut selection, &bundle_dir)?;

    let params = RunParams {
        query: request.query.clone(),
        regex: request.regex,
        days: config.days,
        limit: config.limit,
        research_dir: config.research_dir.clone(),
    };
    let manifest = Manifest::new(now, &params, &selection.candidates);
    let outputs = write_outputs(&bundle_dir, &manifest, &slug, &selection.candidates)?;

    tracing::info!(%bundle_dir, files = selection.len(), "bundle written");

    Ok(BundleReport {
        bundle_dir,
        slug,
        selection,
        outputs,
    })
}

/// Copy every selected document into `bundle_dir`.
///
/// A document whose source cannot be read is skipped and dropped from the
/// selection, so the manifest and index only list files that were copied.
/// Any other copy failure aborts the run.
fn copy_selected(selection: &mut Selection, bundle_dir: &Utf8Path) -> Result<(), BundleError> {
    let mut copied = Vec::with_capacity(selection.candidates.len());

    for candidate in selection.candidates.drain(..) {
        let target = bundle_dir.join(&candidate.out_name);
        match copy_with_times(&candidate.source, &target) {
            Ok(_) => {
                tracing::debug!(source = %candidate.source, out = %candidate.out_name, "copied");
                copied.push(candidate);
            }
            Err(e) if !source_readable(&candidate.source) => {
                tracing::warn!(source = %candidate.source, error = %e, "skipping unreadable document");
                // fs::copy may leave a partial target behind.
                let _ = fs::remove_file(&target);
            }
            Err(e) => {
                return Err(BundleError::CopyFailed {
                    source_path: candidate.source.to_string(),
                    target: target.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    selection.candidates = copied;
    selection.stats.selected = selection.candidates.len();
    Ok(())
}

fn source_readable(source: &Utf8Path) -> bool {
    let mut buf = [0_u8; 1];
    File::open(source).and_then(|mut f| f.read(&mut buf)).is_ok()
}

/// Absolute, canonical research directory. Missing paths and non-directories
/// are both reported as not found.
fn resolve_research_dir(repo_root: &Utf8Path, raw: &str) -> Result<Utf8PathBuf, BundleError> {
    let candidate = absolutize(repo_root, Utf8Path::new(raw));
    let not_found = || BundleError::ResearchDirNotFound {
        path: candidate.to_string(),
    };

    let resolved = canonicalize_utf8(&candidate).map_err(|_| not_found())?;
    if !resolved.is_dir() {
        return Err(not_found());
    }
    Ok(resolved)
}

/// Copy contents and permissions, then carry over access and modification
/// times.
fn copy_with_times(source: &Utf8Path, target: &Utf8Path) -> io::Result<u64> {
    let bytes = fs::copy(source, target)?;

    let metadata = fs::metadata(source)?;
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    // A read-only source yields a read-only copy; fall back to a read handle.
    let file = File::options()
        .write(true)
        .open(target)
        .or_else(|_| File::open(target))?;
    file.set_times(times)?;

    Ok(bytes)
}
