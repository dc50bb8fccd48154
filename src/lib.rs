pub mod config;
pub mod detect;
pub mod hook;
pub mod logging;
pub mod project;
pub mod pytest_ini;

pub(crate) mod cli;
pub(crate) mod command;

pub use cli::{InstallError, InstallOptions, InstallReport};

/// Run one installation and print its outcome to stdout.
///
/// This is the binary entry point. It exists to bridge the binary crate
/// (`main.rs`) to the library without exposing `cli` internals. Library
/// callers that want the report without output should use [`install`].
pub fn run_install(options: &InstallOptions) -> Result<(), InstallError> {
    cli::install::run(options)
}

/// Resolve, detect and write the hook for `options`, relative to `cwd`.
///
/// Never prompts and never prints.
pub fn install(
    options: &InstallOptions,
    cwd: &std::path::Path,
) -> Result<InstallReport, InstallError> {
    cli::install::install(options, cwd)
}
