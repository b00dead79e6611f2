//! Shared value types used across rbundle crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an effective configuration value came from.
///
/// Precedence, highest first: `Cli`, `Config`, `Default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Value provided via CLI argument (highest precedence).
    Cli,
    /// Value loaded from a configuration file.
    Config,
    /// Built-in default value (lowest precedence).
    Default,
}

impl ConfigSource {
    /// Stable lowercase label used in `--print-config` output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Config => "config",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_labels() {
        assert_eq!(ConfigSource::Cli.to_string(), "cli");
        assert_eq!(ConfigSource::Config.to_string(), "config");
        assert_eq!(ConfigSource::Default.to_string(), "default");
    }

    #[test]
    fn test_config_source_serialization() {
        let json = serde_json::to_string(&ConfigSource::Config).unwrap();
        assert_eq!(json, r#""config""#);
    }
}
