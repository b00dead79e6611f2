use std::collections::BTreeSet;

use camino::Utf8Path;
use globset::{Glob, GlobSet, GlobSetBuilder};
use rbundle_utils::error::ConfigError;

/// Extension list used when neither the CLI nor the config file sets one.
pub const DEFAULT_EXTENSIONS: &str = "md,mdx";

/// Default look-back window in days.
pub const DEFAULT_DAYS: i64 = 365;

/// Default number of files kept in a bundle.
pub const DEFAULT_LIMIT: i64 = 50;

/// File selection configuration (`[selectors]` in `.rbundle/config.toml`)
///
/// Nothing is excluded unless configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct Selectors {
    /// Globs matched against paths relative to the research directory.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Selectors {
    /// Validate glob patterns in selectors
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_exclude_set().map(|_| ())
    }

    /// Compile the exclude patterns into a single [`GlobSet`].
    pub fn build_exclude_set(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidValue {
                key: "selectors.exclude".to_string(),
                value: format!("Invalid glob pattern '{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| ConfigError::InvalidValue {
            key: "selectors.exclude".to_string(),
            value: format!("Failed to build glob set: {e}"),
        })
    }
}

/// Parse a comma-separated extension list such as `"md, .MDX,,txt"`.
///
/// Entries are trimmed, stripped of leading dots, and lowercased; empty
/// entries are dropped.
#[must_use]
pub fn parse_extensions(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Whether the lowercased extension of `path` is in `allowed`.
///
/// Files without an extension never match.
#[must_use]
pub fn extension_allowed(path: &Utf8Path, allowed: &BTreeSet<String>) -> bool {
    path.extension()
        .is_some_and(|ext| allowed.contains(&ext.to_lowercase()))
}
