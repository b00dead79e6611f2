//! Configuration management for rbundle
//!
//! Hierarchical configuration with discovery and precedence:
//! CLI > file > defaults. The TOML file supports `[defaults]` and
//! `[selectors]` sections.

mod discovery;
mod model;
mod sources;
mod validation;

pub use model::*;
pub use rbundle_selectors::{DEFAULT_DAYS, DEFAULT_LIMIT, Selectors};
pub use rbundle_utils::types::ConfigSource;

/// Directory searched for during discovery.
pub const CONFIG_DIR_NAME: &str = ".rbundle";

/// File name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";
