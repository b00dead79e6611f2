use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use rbundle_utils::error::ConfigError;
use rbundle_utils::types::ConfigSource;

use super::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, CliArgs, Config, Defaults, Selectors};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    defaults: Option<Defaults>,
    selectors: Option<Selectors>,
}

impl Config {
    /// Discover and load configuration with precedence: CLI > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir().map_err(|e| ConfigError::DiscoveryFailed {
            reason: format!("cannot determine current directory: {e}"),
        })?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory
    ///
    /// Path-driven variant used by tests to avoid process-global state.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let config_path = match &cli_args.config_path {
            Some(explicit) => {
                if !explicit.is_file() {
                    return Err(ConfigError::NotFound {
                        path: explicit.display().to_string(),
                    });
                }
                Some(explicit.clone())
            }
            None => Self::discover_config_file_from(start_dir),
        };

        if let Some(path) = &config_path {
            let file_config = Self::load_config_file(path)?;
            tracing::debug!(path = %path.display(), "loaded config file");
            config.apply_file(file_config);
            config.config_file = Some(path.clone());
        }

        config.apply_cli(cli_args);
        config.validate()?;

        Ok(config)
    }

    fn apply_file(&mut self, file_config: TomlConfig) {
        let src = ConfigSource::Config;

        if let Some(defaults) = file_config.defaults {
            if let Some(days) = defaults.days {
                self.days = days;
                self.mark("days", src.clone());
            }
            if let Some(limit) = defaults.limit {
                self.limit = limit;
                self.mark("limit", src.clone());
            }
            if let Some(research_dir) = defaults.research_dir {
                self.research_dir = research_dir;
                self.mark("research_dir", src.clone());
            }
            if let Some(out) = defaults.out {
                self.out = out;
                self.mark("out", src.clone());
            }
            if let Some(ext) = defaults.ext {
                self.ext = ext;
                self.mark("ext", src.clone());
            }
            if let Some(verbose) = defaults.verbose {
                self.verbose = verbose;
                self.mark("verbose", src.clone());
            }
        }

        if let Some(selectors) = file_config.selectors {
            self.selectors = selectors;
            self.mark("selectors_exclude", src);
        }
    }

    fn apply_cli(&mut self, cli_args: &CliArgs) {
        let src = ConfigSource::Cli;

        if let Some(days) = cli_args.days {
            self.days = days;
            self.mark("days", src.clone());
        }
        if let Some(limit) = cli_args.limit {
            self.limit = limit;
            self.mark("limit", src.clone());
        }
        if let Some(research_dir) = &cli_args.research_dir {
            self.research_dir.clone_from(research_dir);
            self.mark("research_dir", src.clone());
        }
        if let Some(out) = &cli_args.out {
            self.out.clone_from(out);
            self.mark("out", src.clone());
        }
        if let Some(ext) = &cli_args.ext {
            self.ext.clone_from(ext);
            self.mark("ext", src.clone());
        }
        // `--verbose` is a presence flag: only an explicit `true` overrides the file.
        if cli_args.verbose == Some(true) {
            self.verbose = true;
            self.mark("verbose", src);
        }
    }

    fn mark(&mut self, key: &str, source: ConfigSource) {
        self.source_attribution.insert(key.to_string(), source);
    }

    /// Discover config file by searching upward from a given directory
    ///
    /// Walks up the directory tree looking for `.rbundle/config.toml`,
    /// stopping at repository root markers (.git, .hg, .svn) or the
    /// filesystem root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = Some(start_dir);

        while let Some(dir) = current_dir {
            let config_path = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }

            if dir.join(".git").exists() || dir.join(".hg").exists() || dir.join(".svn").exists()
            {
                break;
            }

            current_dir = dir.parent();
        }

        None
    }

    /// Load configuration from TOML file
    fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidFile(format!("cannot read {}: {e}", path.display()))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {e}", path.display())))
    }
}
