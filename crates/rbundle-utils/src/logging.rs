//! Tracing setup for the rbundle CLI.
//!
//! Logs always go to stderr: stdout is reserved for the bundle path so the
//! tool composes in shell pipelines (`open "$(rbundle --query irsa)"`).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset and `--verbose` is off.
pub const DEFAULT_FILTER: &str = "rbundle=warn";

/// Filter used for `--verbose`.
pub const VERBOSE_FILTER: &str = "rbundle=debug,info";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `verbose` when set. Calling this twice returns an
/// error from `try_init` rather than panicking.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

/// Filter directive for the requested verbosity.
#[must_use]
pub const fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}
