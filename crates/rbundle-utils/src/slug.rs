//! Bundle slug sanitization
//!
//! Bundle directories are named `<YYYYMMDD-HHMMSS>__<slug>`. The slug comes
//! from `--name`, else from the query, else falls back to `bundle`.

/// Slug used when neither a name nor a query yields anything usable.
pub const FALLBACK_SLUG: &str = "bundle";

/// Maximum number of characters a query-derived slug keeps.
pub const MAX_QUERY_SLUG_CHARS: usize = 60;

/// Collapse every run of characters outside `[A-Za-z0-9._-]` into a single
/// `-` and strip leading/trailing dashes.
///
/// # Examples
///
/// ```
/// use rbundle_utils::slug::sanitize_slug;
///
/// assert_eq!(sanitize_slug("irsa s3"), "irsa-s3");
/// assert_eq!(sanitize_slug("  (aws|gcp) iam?  "), "aws-gcp-iam");
/// assert_eq!(sanitize_slug("!!!"), "");
/// ```
#[must_use]
pub fn sanitize_slug(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('-');
            in_run = true;
        }
    }

    out.trim_matches('-').to_string()
}

/// Pick the slug for a bundle directory.
///
/// - a non-empty `name` is sanitized as-is (case preserved, no truncation);
/// - otherwise a non-empty `query` is lowercased, sanitized, and cut to
///   [`MAX_QUERY_SLUG_CHARS`] characters;
/// - anything that sanitizes to empty becomes [`FALLBACK_SLUG`].
#[must_use]
pub fn bundle_slug(name: &str, query: &str) -> String {
    let slug = if !name.is_empty() {
        sanitize_slug(name)
    } else if !query.is_empty() {
        sanitize_slug(&query.to_lowercase())
            .chars()
            .take(MAX_QUERY_SLUG_CHARS)
            .collect()
    } else {
        String::new()
    };

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize_keeps_allowed_characters() {
        assert_eq!(sanitize_slug("release-notes_v1.2"), "release-notes_v1.2");
    }

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize_slug("a   b///c"), "a-b-c");
        assert_eq!(sanitize_slug("--a--"), "a");
    }

    #[test]
    fn test_sanitize_replaces_non_ascii() {
        assert_eq!(sanitize_slug("café notes"), "caf-notes");
    }

    #[test]
    fn test_bundle_slug_prefers_name() {
        assert_eq!(bundle_slug("Weekly Digest", "irsa s3"), "Weekly-Digest");
    }

    #[test]
    fn test_bundle_slug_from_query_is_lowercased() {
        assert_eq!(bundle_slug("", "IRSA S3"), "irsa-s3");
    }

    #[test]
    fn test_bundle_slug_query_truncated() {
        let query = "k".repeat(100);
        let slug = bundle_slug("", &query);
        assert_eq!(slug.len(), MAX_QUERY_SLUG_CHARS);
    }

    #[test]
    fn test_bundle_slug_name_not_truncated() {
        let name = "n".repeat(100);
        assert_eq!(bundle_slug(&name, "").len(), 100);
    }

    #[test]
    fn test_bundle_slug_fallbacks() {
        assert_eq!(bundle_slug("", ""), "bundle");
        assert_eq!(bundle_slug("???", ""), "bundle");
        assert_eq!(bundle_slug("", "(|)"), "bundle");
    }

    proptest! {
        #[test]
        fn prop_slug_is_filesystem_safe(name in ".{0,40}", query in ".{0,120}") {
            let slug = bundle_slug(&name, &query);
            prop_assert!(!slug.is_empty());
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
            prop_assert!(!slug.starts_with('-'));
        }

        #[test]
        fn prop_query_slug_bounded(query in "[a-z ]{1,200}") {
            prop_assert!(bundle_slug("", &query).chars().count() <= MAX_QUERY_SLUG_CHARS);
        }
    }
}
