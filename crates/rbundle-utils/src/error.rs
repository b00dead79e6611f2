use std::fmt;
use thiserror::Error;

/// Library-level error type with user-facing reporting.
///
/// `BundleError` is the primary error type returned by rbundle operations.
/// It provides:
/// - Detailed error information for programmatic handling
/// - User-friendly messages with context and suggestions
/// - Mapping to CLI exit codes
///
/// # Exit Code Mapping
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration errors, missing research dir, invalid query pattern |
/// | 1 | Other errors |
///
/// # Example
///
/// ```rust
/// use rbundle_utils::error::BundleError;
/// use rbundle_utils::exit_codes::ExitCode;
///
/// let err = BundleError::ResearchDirNotFound { path: "/tmp/nope".to_string() };
/// assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);
/// assert!(err.display_for_user().contains("Suggestions:"));
/// ```
///
/// Library code returns `BundleError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("research dir not found: {path}")]
    ResearchDirNotFound { path: String },

    #[error("Invalid query pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to copy {source_path} to {target}: {reason}")]
    CopyFailed {
        source_path: String,
        target: String,
        reason: String,
    },

    #[error("Failed to write {path}: {reason}")]
    OutputWriteFailed { path: String, reason: String },
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Validation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::FileSystem => write!(f, "File System"),
            Self::Validation => write!(f, "Validation"),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => {
                format!("Configuration file has invalid format: {reason}")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => {
                format!("Configuration file not found: {path}")
            }
            Self::DiscoveryFailed { reason } => {
                format!("Failed to discover configuration: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidFile(_) => Some(
                "Configuration files must be valid TOML with optional [defaults] and [selectors] sections."
                    .to_string(),
            ),
            Self::InvalidValue { key, value: _ } => Some(format!(
                "The '{key}' configuration option has specific format requirements."
            )),
            Self::NotFound { path: _ } => Some(
                "An explicit --config path must point at an existing file.".to_string(),
            ),
            Self::DiscoveryFailed { reason: _ } => Some(
                "rbundle searches for .rbundle/config.toml from the current directory upward."
                    .to_string(),
            ),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile(_) => vec![
                "Check the TOML syntax of .rbundle/config.toml".to_string(),
                "Remove keys that are not listed in the documentation".to_string(),
            ],
            Self::InvalidValue { key, value: _ } => match key.as_str() {
                "selectors.exclude" => vec![
                    "Use glob syntax such as '**/drafts/**'".to_string(),
                    "Escape literal brackets in patterns".to_string(),
                ],
                _ => vec![
                    "Check the documentation for valid values for this option".to_string(),
                    "Remove the option to use the default value".to_string(),
                ],
            },
            Self::NotFound { path: _ } => vec![
                "Check the path passed to --config".to_string(),
                "Omit --config to use discovery and built-in defaults".to_string(),
            ],
            Self::DiscoveryFailed { reason: _ } => vec![
                "Check permissions on the current directory and its parents".to_string(),
                "Use --config <path> to specify the configuration file explicitly".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

impl UserFriendlyError for BundleError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(config_err) => config_err.user_message(),
            Self::ResearchDirNotFound { path } => {
                format!("research dir not found: {path}")
            }
            Self::InvalidPattern { pattern, reason } => {
                format!("Query '{pattern}' is not a valid regular expression: {reason}")
            }
            Self::Io(io_err) => {
                format!("File system operation failed: {io_err}")
            }
            Self::CopyFailed {
                source_path,
                target,
                reason,
            } => {
                format!("Could not copy {source_path} into the bundle as {target}: {reason}")
            }
            Self::OutputWriteFailed { path, reason } => {
                format!("Could not write bundle output {path}: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(config_err) => config_err.context(),
            Self::ResearchDirNotFound { .. } => Some(
                "The research directory is resolved relative to the current working directory."
                    .to_string(),
            ),
            Self::InvalidPattern { .. } => {
                Some("--regex treats the whole --query value as one pattern.".to_string())
            }
            Self::Io(_) | Self::CopyFailed { .. } | Self::OutputWriteFailed { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(config_err) => config_err.suggestions(),
            Self::ResearchDirNotFound { .. } => vec![
                "Run rbundle from the repository root".to_string(),
                "Pass --research-dir <path> pointing at an existing directory".to_string(),
            ],
            Self::InvalidPattern { .. } => vec![
                "Drop --regex to search for literal terms".to_string(),
                "Escape regex metacharacters such as ( [ + ?".to_string(),
            ],
            Self::Io(_) | Self::CopyFailed { .. } | Self::OutputWriteFailed { .. } => vec![
                "Check that the output directory is writable".to_string(),
                "Check available disk space".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::InvalidPattern { .. } => ErrorCategory::Validation,
            Self::ResearchDirNotFound { .. }
            | Self::Io(_)
            | Self::CopyFailed { .. }
            | Self::OutputWriteFailed { .. } => ErrorCategory::FileSystem,
        }
    }
}

impl BundleError {
    /// Get a user-friendly error message with context and actionable suggestions.
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("ERROR: {}\n", self.user_message()));

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the appropriate CLI exit code.
    ///
    /// This is the single source of truth for CLI exit codes:
    ///
    /// | Exit Code | Name | Description |
    /// |-----------|------|-------------|
    /// | 1 | INTERNAL | General failure |
    /// | 2 | CLI_ARGS | Bad research dir, config, or pattern |
    #[must_use]
    pub fn to_exit_code(&self) -> crate::exit_codes::ExitCode {
        use crate::exit_codes::ExitCode;

        match self {
            BundleError::Config(_)
            | BundleError::ResearchDirNotFound { .. }
            | BundleError::InvalidPattern { .. } => ExitCode::CLI_ARGS,
            BundleError::Io(_)
            | BundleError::CopyFailed { .. }
            | BundleError::OutputWriteFailed { .. } => ExitCode::INTERNAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes::ExitCode;

    #[test]
    fn test_research_dir_error_maps_to_cli_args() {
        let err = BundleError::ResearchDirNotFound {
            path: "/repo/research".to_string(),
        };
        assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);
        assert_eq!(err.to_string(), "research dir not found: /repo/research");
        assert_eq!(err.category(), ErrorCategory::FileSystem);
    }

    #[test]
    fn test_config_and_pattern_errors_map_to_cli_args() {
        let err = BundleError::Config(ConfigError::InvalidFile("bad toml".to_string()));
        assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);

        let err = BundleError::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert_eq!(err.to_exit_code(), ExitCode::CLI_ARGS);
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_io_errors_map_to_internal() {
        let err = BundleError::Io(std::io::Error::other("disk full"));
        assert_eq!(err.to_exit_code(), ExitCode::INTERNAL);

        let err = BundleError::OutputWriteFailed {
            path: "manifest.json".to_string(),
            reason: "denied".to_string(),
        };
        assert_eq!(err.to_exit_code(), ExitCode::INTERNAL);
    }

    #[test]
    fn test_display_for_user_includes_context_and_suggestions() {
        let err = BundleError::ResearchDirNotFound {
            path: "/repo/research".to_string(),
        };
        let message = err.display_for_user();
        assert!(message.starts_with("ERROR: research dir not found: /repo/research"));
        assert!(message.contains("Context:"));
        assert!(message.contains("Suggestions:"));
        assert!(message.contains("--research-dir"));
    }

    #[test]
    fn test_config_error_delegates_user_message() {
        let err = BundleError::Config(ConfigError::InvalidValue {
            key: "selectors.exclude".to_string(),
            value: "Invalid glob pattern '[': unclosed class".to_string(),
        });
        assert!(err.user_message().contains("selectors.exclude"));
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("glob syntax"))
        );
    }
}
