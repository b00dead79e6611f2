//! Command-line interface for rbundle
//!
//! ## Module Structure
//!
//! - `args`: CLI argument definitions (clap)
//! - `run`: entry point, configuration, error reporting
//! - `tests`: argument parsing tests (cfg(test) only)

pub mod args;
mod run;


pub use args::Cli;
pub use run::run;
