//! Logging initialization.
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from the
//! `SETUP_PRE_COMMIT_LOG` environment variable when it is set; otherwise the
//! `-v` count picks the level. With neither, only warnings are shown, so a
//! normal run leaves stderr empty.
//!
//! ```bash
//! setup-pre-commit -v ./project
//! SETUP_PRE_COMMIT_LOG=setup_pre_commit=trace setup-pre-commit
//! ```

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "SETUP_PRE_COMMIT_LOG";

/// Filter directive for a given `-v` count.
pub fn directive_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "setup_pre_commit=debug,warn",
        _ => "setup_pre_commit=trace,info",
    }
}

/// Initialize the global tracing subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (call once, from `main`).
pub fn init(verbosity: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(directive_for(verbosity)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
