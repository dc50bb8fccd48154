use clap::Parser;
use std::path::PathBuf;

use setup_pre_commit::InstallOptions;

/// Installs a git pre-commit hook that runs the project's test suite.
#[derive(Debug, Parser)]
#[command(name = "setup-pre-commit", version, about)]
struct Cli {
    /// Project directory (prompted for on a terminal, else the current directory)
    project_path: Option<PathBuf>,

    /// Path to a KDL settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the hook script instead of writing anything
    #[arg(long)]
    dry_run: bool,

    /// Print the result as a JSON object
    #[arg(long)]
    json: bool,

    /// Do not create pytest.ini
    #[arg(long)]
    no_pytest_ini: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_pre_commit::logging::init(cli.verbose);

    let options = InstallOptions {
        project_path: cli.project_path,
        config: cli.config,
        dry_run: cli.dry_run,
        json: cli.json,
        no_pytest_ini: cli.no_pytest_ini,
    };
    setup_pre_commit::run_install(&options)?;
    Ok(())
}
