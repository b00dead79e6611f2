use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use rbundle_selectors::{DEFAULT_DAYS, DEFAULT_EXTENSIONS, DEFAULT_LIMIT, Selectors};
use rbundle_utils::types::ConfigSource;

/// Default research directory, relative to the repo root.
pub const DEFAULT_RESEARCH_DIR: &str = "research";

/// Default output root, relative to the repo root.
pub const DEFAULT_OUT_DIR: &str = "notebook-bundles";

/// `[defaults]` section of `.rbundle/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub days: Option<i64>,
    pub limit: Option<i64>,
    pub research_dir: Option<String>,
    pub out: Option<String>,
    /// Comma-separated extension list, same syntax as `--ext`.
    pub ext: Option<String>,
    pub verbose: Option<bool>,
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub days: Option<i64>,
    pub limit: Option<i64>,
    pub research_dir: Option<String>,
    pub out: Option<String>,
    pub ext: Option<String>,
    pub verbose: Option<bool>,
}

/// Effective configuration for one rbundle run.
///
/// Use [`Config::discover()`] for CLI-like behavior that searches for
/// `.rbundle/config.toml` upward from the current directory and applies
/// built-in defaults for unspecified values.
#[derive(Debug, Clone)]
pub struct Config {
    pub days: i64,
    pub limit: i64,
    pub research_dir: String,
    pub out: String,
    pub ext: String,
    pub verbose: bool,
    pub selectors: Selectors,
    /// Config file that contributed values, if any.
    pub config_file: Option<PathBuf>,
    pub(crate) source_attribution: HashMap<String, ConfigSource>,
}

impl Default for Config {
    fn default() -> Self {
        let source_attribution = super::sources::TRACKED_KEYS
            .iter()
            .map(|key| ((*key).to_string(), ConfigSource::Default))
            .collect();

        Self {
            days: DEFAULT_DAYS,
            limit: DEFAULT_LIMIT,
            research_dir: DEFAULT_RESEARCH_DIR.to_string(),
            out: DEFAULT_OUT_DIR.to_string(),
            ext: DEFAULT_EXTENSIONS.to_string(),
            verbose: false,
            selectors: Selectors::default(),
            config_file: None,
            source_attribution,
        }
    }
}
