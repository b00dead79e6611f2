//! CLI argument definitions
//!
//! rbundle has a single command, so `Cli` carries every flag directly.

use clap::Parser;
use std::path::PathBuf;

use crate::CliArgs;

/// rbundle - bundle recent, relevant research notes
#[derive(Parser, Debug)]
#[command(name = "rbundle")]
#[command(about = "Select the most relevant recent research notes and bundle them for upload")]
#[command(long_about = r#"
rbundle walks a research directory, scores every Markdown document by query
hits and recency, and copies the best matches into a timestamped bundle
directory with a manifest.json and an index.md.

Score = hits * 100 + recency * 10, where recency falls linearly from 1.0
(modified now) to 0.0 at the edge of the --days window.

EXAMPLES:
  # Notes about IRSA and S3 from the last 180 days
  rbundle --query "irsa s3" --days 180

  # Everything modified in the last two weeks
  rbundle --days 14 --limit 200

  # Regex query with an explicit bundle name
  rbundle --query "karpenter|autoscaler" --regex --name scaling

  # Show the effective configuration and where each value came from
  rbundle --print-config

CONFIGURATION:
  Precedence: CLI flags > config file > defaults
  The config file is discovered by searching upward from CWD for
  .rbundle/config.toml (stopping at the repository root).
  Use --config to specify an explicit config file path.

The absolute bundle directory is printed on stdout.
"#)]
#[command(version)]
pub struct Cli {
    /// Keywords (whitespace-separated terms) or a regex with --regex
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub query: String,

    /// Treat --query as a single case-insensitive regular expression
    #[arg(long)]
    pub regex: bool,

    /// Only include files modified in the last N days [default: 365]
    #[arg(long, allow_negative_numbers = true)]
    pub days: Option<i64>,

    /// Maximum number of files in the bundle [default: 50]
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Directory to scan, relative to CWD [default: research]
    #[arg(long)]
    pub research_dir: Option<String>,

    /// Output root for bundles, relative to CWD [default: notebook-bundles]
    #[arg(long)]
    pub out: Option<String>,

    /// Bundle name; defaults to a slug of the query
    #[arg(long, default_value = "")]
    pub name: String,

    /// Comma-separated file extensions to include [default: md,mdx]
    #[arg(long)]
    pub ext: Option<String>,

    /// Path to configuration file (overrides discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the effective configuration with sources and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Values for the configuration layer. Unset flags stay `None` so the
    /// config file and defaults can fill them.
    #[must_use]
    pub fn to_cli_args(&self) -> CliArgs {
        CliArgs {
            config_path: self.config.clone(),
            days: self.days,
            limit: self.limit,
            research_dir: self.research_dir.clone(),
            out: self.out.clone(),
            ext: self.ext.clone(),
            verbose: Some(self.verbose),
        }
    }
}
