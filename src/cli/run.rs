//! CLI entry point
//!
//! `run()` parses arguments, discovers configuration, initializes logging,
//! and runs the bundle pipeline. It prints all output, including errors.

use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

use rbundle_utils::logging::init_tracing;

use super::args::Cli;
use crate::bundle::{BundleRequest, create_bundle};
use crate::{BundleError, Config, ExitCode};

/// Main CLI execution function.
///
/// Returns `Ok(())` after printing the bundle path, or `Err(ExitCode)` after
/// printing the error report to stderr. main.rs only maps the code to the
/// process exit status.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    let cli_args = cli.to_cli_args();

    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => return Err(report(&BundleError::from(err))),
    };

    if let Err(e) = init_tracing(config.verbose) {
        eprintln!("warning: failed to initialize logging: {e}");
    }
    if let Some(path) = &config.config_file {
        tracing::debug!(path = %path.display(), "using config file");
    }

    if cli.print_config {
        print_effective_config(&config);
        return Ok(());
    }

    let cwd = match current_dir() {
        Ok(cwd) => cwd,
        Err(err) => return Err(report(&err)),
    };

    let request = BundleRequest {
        query: cli.query,
        regex: cli.regex,
        name: cli.name,
        config,
    };

    match create_bundle(&request, &cwd, chrono::Utc::now()) {
        Ok(bundle) => {
            println!("{}", bundle.bundle_dir);
            Ok(())
        }
        Err(err) => Err(report(&err)),
    }
}

/// Print the user-facing report and pick the exit code.
fn report(err: &BundleError) -> ExitCode {
    tracing::debug!(error = ?err, "run failed");
    eprintln!("{}", err.display_for_user());
    err.to_exit_code()
}

fn current_dir() -> Result<Utf8PathBuf, BundleError> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
        BundleError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("current directory is not valid UTF-8: {}", path.display()),
        ))
    })
}

fn print_effective_config(config: &Config) {
    let mut stdout = std::io::stdout().lock();
    let config_file = config
        .config_file
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());

    // Broken pipes are not worth an error exit here.
    let _ = writeln!(stdout, "config file: {config_file}");
    for (key, (value, source)) in config.effective_config() {
        let _ = writeln!(stdout, "{key} = {value} (from {source})");
    }
}
