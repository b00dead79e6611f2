//! rbundle - select recent, relevant research notes and bundle them
//!
//! rbundle scans a research directory for Markdown documents, scores each
//! one by keyword hits and recency, and copies the top results into a
//! timestamped bundle directory together with a `manifest.json` and an
//! `index.md`. The bundle is ready to upload to a notebook tool as a single
//! folder.
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Most relevant notes about IRSA and S3 from the last 180 days
//! rbundle --query "irsa s3" --days 180
//!
//! # Everything touched in the last two weeks
//! rbundle --days 14 --limit 200
//!
//! # Regex query, custom bundle name
//! rbundle --query "karpenter|cluster-autoscaler" --regex --name scaling
//! ```
//!
//! The absolute bundle directory is printed on stdout.
//!
//! # Library
//!
//! [`bundle::create_bundle`] runs the full pipeline for a [`BundleRequest`]
//! and returns a [`BundleReport`]. Selection alone is available through
//! [`rbundle_select::CandidateSelector`].
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success, including empty selections |
//! | 1 | I/O failure while creating the bundle |
//! | 2 | Missing research directory, invalid pattern, or configuration error |

pub mod bundle;
pub mod cli;

pub use bundle::{BundleReport, BundleRequest, create_bundle};
pub use rbundle_config::{CliArgs, Config};
pub use rbundle_utils::error::{BundleError, ConfigError};
pub use rbundle_utils::exit_codes::ExitCode;
