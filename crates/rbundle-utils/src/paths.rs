//! Path helpers shared by the scanner and the bundle writer.

use camino::{Utf8Path, Utf8PathBuf};
use std::io;

/// mkdir -p; treat `AlreadyExists` as success (removes TOCTTOU races)
pub fn ensure_dir_all<P: AsRef<std::path::Path>>(p: P) -> io::Result<()> {
    match std::fs::create_dir_all(&p) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// Canonicalize into a UTF-8 path.
///
/// On Windows `dunce` strips the `\\?\` verbatim prefix so relative paths and
/// printed bundle locations stay readable.
pub fn canonicalize_utf8(path: &Utf8Path) -> io::Result<Utf8PathBuf> {
    #[cfg(windows)]
    let resolved = dunce::canonicalize(path.as_std_path())?;
    #[cfg(not(windows))]
    let resolved = std::fs::canonicalize(path.as_std_path())?;

    Utf8PathBuf::from_path_buf(resolved).map_err(|p| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("path is not valid UTF-8: {}", p.display()),
        )
    })
}

/// Resolve `path` against `base` unless it is already absolute. An empty
/// path resolves to `base` itself.
#[must_use]
pub fn absolutize(base: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.as_str().is_empty() {
        base.to_path_buf()
    } else if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Path of `path` relative to `repo_root`.
///
/// Files outside the repo root fall back to a path relative to
/// `research_dir`'s parent, so the research directory name is kept as the
/// first component (e.g. `research/aws/s3.md`).
#[must_use]
pub fn relative_to_root(path: &Utf8Path, repo_root: &Utf8Path, research_dir: &Utf8Path) -> Utf8PathBuf {
    if let Ok(rel) = path.strip_prefix(repo_root) {
        return rel.to_path_buf();
    }
    if let Some(parent) = research_dir.parent()
        && let Ok(rel) = path.strip_prefix(parent)
    {
        return rel.to_path_buf();
    }
    path.file_name()
        .map_or_else(|| path.to_path_buf(), Utf8PathBuf::from)
}
