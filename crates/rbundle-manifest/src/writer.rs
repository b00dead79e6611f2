use camino::{Utf8Path, Utf8PathBuf};

use rbundle_select::Candidate;
use rbundle_utils::atomic_write::write_file_atomic;
use rbundle_utils::error::BundleError;

use crate::model::Manifest;
use crate::render::render_index;

pub const MANIFEST_FILE_NAME: &str = "manifest.json";
pub const INDEX_FILE_NAME: &str = "index.md";

/// Paths of the summary files written into a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutputs {
    pub manifest_path: Utf8PathBuf,
    pub index_path: Utf8PathBuf,
}

/// Serialize the manifest as pretty-printed JSON (2-space indent).
pub fn emit_manifest_json(manifest: &Manifest) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

/// Write `manifest.json` into `bundle_dir`.
pub fn write_manifest(bundle_dir: &Utf8Path, manifest: &Manifest) -> Result<Utf8PathBuf, BundleError> {
    let path = bundle_dir.join(MANIFEST_FILE_NAME);
    let json = emit_manifest_json(manifest).map_err(|e| BundleError::OutputWriteFailed {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    write_output(&path, &json)?;
    Ok(path)
}

/// Write `index.md` into `bundle_dir`.
pub fn write_index(
    bundle_dir: &Utf8Path,
    manifest: &Manifest,
    slug: &str,
    selected: &[Candidate],
) -> Result<Utf8PathBuf, BundleError> {
    let path = bundle_dir.join(INDEX_FILE_NAME);
    write_output(&path, &render_index(manifest, slug, selected))?;
    Ok(path)
}

/// Write both summary files.
pub fn write_outputs(
    bundle_dir: &Utf8Path,
    manifest: &Manifest,
    slug: &str,
    selected: &[Candidate],
) -> Result<BundleOutputs, BundleError> {
    let manifest_path = write_manifest(bundle_dir, manifest)?;
    let index_path = write_index(bundle_dir, manifest, slug, selected)?;
    Ok(BundleOutputs {
        manifest_path,
        index_path,
    })
}

fn write_output(path: &Utf8Path, content: &str) -> Result<(), BundleError> {
    let result = write_file_atomic(path, content).map_err(|e| BundleError::OutputWriteFailed {
        path: path.to_string(),
        reason: format!("{e:#}"),
    })?;

    if result.rename_retry_count > 0 {
        tracing::warn!(%path, retries = result.rename_retry_count, "rename needed retries");
    }
    tracing::debug!(%path, bytes = result.bytes_written, "wrote bundle output");
    Ok(())
}
