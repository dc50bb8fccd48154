use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{ConfigError, Settings};
use crate::detect;
use crate::hook::{self, HookConfig};
use crate::project::{self, ProjectError, ProjectRoot};
use crate::pytest_ini;

/// What the binary was asked to do, independent of how arguments were parsed.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Target project; `None` means prompt (interactive stdin) or the current directory.
    pub project_path: Option<PathBuf>,
    /// Optional KDL settings file.
    pub config: Option<PathBuf>,
    /// Detect and render only; write nothing.
    pub dry_run: bool,
    /// Print the [`InstallReport`] as JSON instead of progress lines.
    pub json: bool,
    /// Never create `pytest.ini`, whatever the settings file says.
    pub no_pytest_ini: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub hook: HookConfig,
    pub hook_path: PathBuf,
    pub pytest_ini_created: bool,
    pub dry_run: bool,
    /// The rendered script, only included for dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// Every way a run can fail.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum InstallError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write {}", path.display())]
    #[diagnostic(code(setup_pre_commit::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read the project path")]
    #[diagnostic(code(setup_pre_commit::prompt))]
    Prompt(#[source] io::Error),

    #[error("failed to serialize the report")]
    #[diagnostic(code(setup_pre_commit::report))]
    Report(#[from] serde_json::Error),
}

/// Execute one run end to end: choose the project, install, print the outcome.
pub fn run(options: &InstallOptions) -> Result<(), InstallError> {
    let cwd = project::current_dir()?;

    let mut options = options.clone();
    if options.project_path.is_none() && !options.json && io::stdin().is_terminal() {
        let stdin = io::stdin();
        options.project_path =
            super::prompt::ask_project_path(&cwd, &mut stdin.lock(), &mut io::stdout())
                .map_err(InstallError::Prompt)?;
    }

    let report = install(&options, &cwd)?;

    if options.json {
        println!("{}", serde_json::to_string(&report)?);
    } else if let Some(script) = &report.script {
        print!("{script}");
    } else {
        print_summary(&report);
    }
    Ok(())
}

/// Resolve, detect and (unless dry-run) write. Prints nothing.
///
/// Settings are loaded and every precondition is checked before the first
/// write, so any error from those steps leaves the filesystem untouched.
pub fn install(options: &InstallOptions, cwd: &Path) -> Result<InstallReport, InstallError> {
    let settings = match &options.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let root = ProjectRoot::resolve(options.project_path.as_deref(), cwd)?;

    let invocation = detect::detect_invocation(root.path());
    let test_command = match &settings.test_command {
        Some(command) => command.clone(),
        None => invocation.command(&settings.python),
    };
    let venv_dir_name = detect::detect_venv(root.path(), &settings.venv_candidates);
    tracing::debug!(?invocation, %test_command, ?venv_dir_name, "detection finished");

    let config = HookConfig {
        project_root: root.into_path_buf(),
        test_command,
        venv_dir_name,
    };
    let hook_path = config.hook_path();

    if options.dry_run {
        return Ok(InstallReport {
            script: Some(config.render()),
            hook: config,
            hook_path,
            pytest_ini_created: false,
            dry_run: true,
        });
    }

    // Only an inferred pytest run gets a pytest.ini; a `test/`-only project
    // keeps unittest discovery on every later run.
    let wants_pytest_ini = settings.create_pytest_ini
        && !options.no_pytest_ini
        && settings.test_command.is_none()
        && invocation.uses_pytest();
    let pytest_ini_created = if wants_pytest_ini {
        pytest_ini::ensure(&config.project_root).map_err(|source| InstallError::Write {
            path: pytest_ini::path(&config.project_root),
            source,
        })?
    } else {
        false
    };

    let hook_path = hook::install(&config).map_err(|source| InstallError::Write {
        path: hook_path,
        source,
    })?;

    Ok(InstallReport {
        hook: config,
        hook_path,
        pytest_ini_created,
        dry_run: false,
        script: None,
    })
}

fn print_summary(report: &InstallReport) {
    println!(
        "Configuring pre-commit hook in project: {}",
        report.hook.project_root.display()
    );
    if report.pytest_ini_created {
        println!(
            "Created pytest.ini: {}",
            pytest_ini::path(&report.hook.project_root).display()
        );
    }
    println!("Detected test command: {}", report.hook.test_command);
    if let Some(venv) = &report.hook.venv_dir_name {
        println!("Detected virtual environment: {venv}");
    }
    println!("Pre-commit hook installed successfully!");
    println!("Location: {}", report.hook_path.display());
    println!();
    println!("To try it, make a commit and watch the tests run:");
    println!("  git commit -m 'test: verify hook'");
}
