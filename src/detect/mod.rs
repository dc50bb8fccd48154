//! Test convention inference.
//!
//! Both probes are plain existence checks against the project root. Neither
//! reads file contents, so the result only depends on which names exist.

use std::path::Path;

/// Files or directories whose presence marks a pytest project.
///
/// `tests` counts as a marker even when it is a plain file; only the scoped
/// invocation requires it to be a directory.
pub const PYTEST_MARKERS: &[&str] = &["pytest.ini", "pyproject.toml", "setup.py", "tests"];

/// Directory scoped by the pytest invocation when present.
pub const PYTEST_TESTS_DIR: &str = "tests";

/// Marker for projects laid out for unittest discovery.
pub const UNITTEST_MARKER: &str = "test";

/// Virtual environment names, probed in this order.
pub const DEFAULT_VENV_CANDIDATES: &[&str] = &["venv", ".venv", "env", ".env"];

/// How the hook invokes the test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// `pytest tests -v`: pytest marker present and `tests/` is a directory.
    PytestTests,
    /// `pytest -v`: pytest marker without a `tests/` directory, or nothing matched.
    Pytest,
    /// `unittest discover -v`: only a `test` entry exists.
    UnittestDiscover,
}

impl Invocation {
    /// The shell command for this invocation, run through `python -m`.
    pub fn command(self, python: &str) -> String {
        match self {
            Invocation::PytestTests => format!("{python} -m pytest {PYTEST_TESTS_DIR} -v"),
            Invocation::Pytest => format!("{python} -m pytest -v"),
            Invocation::UnittestDiscover => format!("{python} -m unittest discover -v"),
        }
    }

    pub fn uses_pytest(self) -> bool {
        matches!(self, Invocation::PytestTests | Invocation::Pytest)
    }
}

/// Pick the test invocation for a project. First matching rule wins:
///
/// 1. any of [`PYTEST_MARKERS`] exists: pytest, scoped to `tests/` if that is a directory
/// 2. `test` exists: unittest discovery
/// 3. otherwise: bare pytest
pub fn detect_invocation(root: &Path) -> Invocation {
    if let Some(marker) = PYTEST_MARKERS.iter().find(|m| root.join(m).exists()) {
        let scoped = root.join(PYTEST_TESTS_DIR).is_dir();
        tracing::debug!(marker, scoped, "pytest marker found");
        return if scoped {
            Invocation::PytestTests
        } else {
            Invocation::Pytest
        };
    }

    if root.join(UNITTEST_MARKER).exists() {
        tracing::debug!(marker = UNITTEST_MARKER, "unittest layout found");
        return Invocation::UnittestDiscover;
    }

    tracing::debug!("no test layout markers, defaulting to pytest");
    Invocation::Pytest
}

/// Return the first candidate that exists as a directory under `root`.
///
/// List order decides, not specificity: with both `venv/` and `.venv/`
/// present and the default list, `venv` wins.
pub fn detect_venv<S: AsRef<str>>(root: &Path, candidates: &[S]) -> Option<String> {
    let found = candidates
        .iter()
        .map(AsRef::<str>::as_ref)
        .find(|name| root.join(name).is_dir())
        .map(String::from);

    match &found {
        Some(name) => tracing::debug!(venv = %name, "virtual environment found"),
        None => tracing::debug!("no virtual environment directory"),
    }
    found
}
