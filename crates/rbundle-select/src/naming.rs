//! Flattened output names.
//!
//! Every selected document lands directly in the bundle directory, so its
//! relative path is folded into a single file name.

use camino::Utf8Path;
use std::collections::HashSet;

use crate::model::Candidate;

/// Separator that replaces path separators.
pub const COMPONENT_SEPARATOR: &str = "__";
/// Names longer than this (in characters) are shortened.
pub const MAX_NAME_CHARS: usize = 180;
/// Characters of the stem kept in a shortened name.
pub const SHORT_STEM_CHARS: usize = 80;
/// Hex characters of the path digest in a shortened name.
pub const DIGEST_HEX_CHARS: usize = 10;

/// Fold a relative path into one file name.
///
/// Components are joined with `__` and spaces become `_`. Names over
/// [`MAX_NAME_CHARS`] become `<stem[..80]>__<digest><ext>`, where the digest
/// is taken over the relative path string.
#[must_use]
pub fn flat_name(relative: &Utf8Path) -> String {
    let flat = relative
        .components()
        .map(|c| c.as_str())
        .filter(|c| !c.is_empty() && *c != "/" && *c != "\\")
        .collect::<Vec<_>>()
        .join(COMPONENT_SEPARATOR)
        .replace(' ', "_");

    if flat.chars().count() > MAX_NAME_CHARS {
        digest_name(&flat, relative, SHORT_STEM_CHARS)
    } else {
        flat
    }
}

/// `<stem truncated to stem_chars>__<digest><ext>`
fn digest_name(flat: &str, relative: &Utf8Path, stem_chars: usize) -> String {
    let (stem, suffix) = split_suffix(flat);
    let stem: String = stem.chars().take(stem_chars).collect();
    format!(
        "{stem}{COMPONENT_SEPARATOR}{}{suffix}",
        path_digest(relative)
    )
}

/// Leading hex characters of the BLAKE3 digest of the path string.
#[must_use]
pub fn path_digest(relative: &Utf8Path) -> String {
    let hash = blake3::hash(relative.as_str().as_bytes());
    hash.to_hex()[..DIGEST_HEX_CHARS].to_string()
}

/// Split `name` into stem and `.ext` suffix, looking only at the last
/// folded component. Dotfiles and names without a non-empty extension have
/// no suffix.
fn split_suffix(name: &str) -> (&str, &str) {
    let base_start = name
        .rfind(COMPONENT_SEPARATOR)
        .map_or(0, |idx| idx + COMPONENT_SEPARATOR.len());

    match name[base_start..].rfind('.') {
        Some(idx) if idx > 0 && base_start + idx + 1 < name.len() => {
            name.split_at(base_start + idx)
        }
        _ => (name, ""),
    }
}

/// Rewrite colliding output names so every file in a bundle is distinct.
///
/// Distinct paths can flatten to the same name (`a/b__c.md` and
/// `a__b/c.md`). The first candidate in rank order keeps its name; later
/// ones switch to the digest form, which is unique per relative path.
pub fn dedupe_out_names(candidates: &mut [Candidate]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(candidates.len());

    for candidate in candidates.iter_mut() {
        if !taken.insert(candidate.out_name.clone()) {
            let renamed = digest_name(
                &candidate.out_name,
                &candidate.relative,
                SHORT_STEM_CHARS,
            );
            tracing::debug!(
                relative = %candidate.relative,
                from = %candidate.out_name,
                to = %renamed,
                "output name collision"
            );
            taken.insert(renamed.clone());
            candidate.out_name = renamed;
        }
    }
}
