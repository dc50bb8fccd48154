mod document;

use std::path::{Path, PathBuf};

use document::{ConfigDocument, ParseNode};

use crate::detect::DEFAULT_VENV_CANDIDATES;

/// Settings loaded from an optional KDL file.
///
/// Every field has a default, so an empty file (or no file) behaves exactly
/// like plain inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Replaces test-command inference when set.
    pub test_command: Option<String>,
    /// Interpreter used for the `-m pytest` / `-m unittest` invocations.
    pub python: String,
    /// Virtual environment names, probed in order.
    pub venv_candidates: Vec<String>,
    pub create_pytest_ini: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            test_command: None,
            python: "python".to_string(),
            venv_candidates: DEFAULT_VENV_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            create_pytest_ini: true,
        }
    }
}

/// Errors that can occur when loading or parsing a config file.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    #[diagnostic(code(setup_pre_commit::config::not_found))]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    #[diagnostic(code(setup_pre_commit::config::read))]
    ReadError(#[from] std::io::Error),
    #[error("invalid KDL syntax: {0}")]
    #[diagnostic(code(setup_pre_commit::config::syntax))]
    ParseError(String),
    #[error("invalid config: {0}")]
    #[diagnostic(code(setup_pre_commit::config::invalid))]
    ValidationError(String),
}

impl Settings {
    /// Load settings from a KDL file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let doc = ConfigDocument::load(path)?;
        Self::from_document(&doc)
    }

    /// Parse a KDL string into settings.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let doc = ConfigDocument::parse(content)?;
        Self::from_document(&doc)
    }

    fn from_document(doc: &ConfigDocument) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        let mut test_command = Scalar::default();
        let mut python = Scalar::default();
        let mut create_pytest_ini = Scalar::default();
        let mut candidates: Option<Vec<String>> = None;

        for node in doc.nodes() {
            match node.name() {
                "test-command" => {
                    let value = single_string(&node)?;
                    validate_command(&node, &value)?;
                    test_command.set(&node, value)?;
                }
                "python" => {
                    let value = single_string(&node)?;
                    if value.trim().is_empty() {
                        return Err(invalid(&node, "'python' must not be empty"));
                    }
                    python.set(&node, value)?;
                }
                "venv-candidates" => {
                    // Multiple nodes merge: `venv-candidates "venv"` + `venv-candidates ".venv"`.
                    let names = venv_names(&node)?;
                    candidates.get_or_insert_with(Vec::new).extend(names);
                }
                "create-pytest-ini" => {
                    let value = single_bool(&node)?;
                    create_pytest_ini.set(&node, value)?;
                }
                other => {
                    return Err(invalid(&node, &format!("unknown setting '{other}'")));
                }
            }
        }

        settings.test_command = test_command.0;
        if let Some(value) = python.0 {
            settings.python = value;
        }
        if let Some(names) = candidates {
            settings.venv_candidates = names;
        }
        if let Some(value) = create_pytest_ini.0 {
            settings.create_pytest_ini = value;
        }
        Ok(settings)
    }
}

/// A setting that may appear at most once.
struct Scalar<T>(Option<T>);

impl<T> Default for Scalar<T> {
    fn default() -> Self {
        Scalar(None)
    }
}

impl<T> Scalar<T> {
    fn set(&mut self, node: &ParseNode<'_>, value: T) -> Result<(), ConfigError> {
        if self.0.is_some() {
            return Err(invalid(
                node,
                &format!("'{}' is set more than once", node.name()),
            ));
        }
        self.0 = Some(value);
        Ok(())
    }
}

fn invalid(node: &ParseNode<'_>, msg: &str) -> ConfigError {
    ConfigError::ValidationError(format!("line {}: {msg}", node.line()))
}

fn single_string(node: &ParseNode<'_>) -> Result<String, ConfigError> {
    match node.string_values().as_slice() {
        [value] if node.argument_count() == 1 && !node.has_extras() => Ok(value.to_string()),
        _ => Err(invalid(
            node,
            &format!("'{}' takes exactly one string", node.name()),
        )),
    }
}

fn single_bool(node: &ParseNode<'_>) -> Result<bool, ConfigError> {
    match node.bool_values().as_slice() {
        [value] if node.argument_count() == 1 && !node.has_extras() => Ok(*value),
        _ => Err(invalid(
            node,
            &format!("'{}' takes exactly one boolean (#true or #false)", node.name()),
        )),
    }
}

/// Candidate names are joined onto the project root, so they must stay
/// single, non-empty path components.
fn venv_names(node: &ParseNode<'_>) -> Result<Vec<String>, ConfigError> {
    let values = node.string_values();
    if values.is_empty() || values.len() != node.argument_count() || node.has_extras() {
        return Err(invalid(
            node,
            "'venv-candidates' takes one or more directory names",
        ));
    }
    for value in &values {
        let bad = value.is_empty()
            || *value == "."
            || *value == ".."
            || value.contains('/')
            || value.contains('\\');
        if bad {
            return Err(invalid(
                node,
                &format!("'{value}' is not a plain directory name"),
            ));
        }
    }
    Ok(values.into_iter().map(String::from).collect())
}

fn validate_command(node: &ParseNode<'_>, command: &str) -> Result<(), ConfigError> {
    let programs = crate::command::programs(command)
        .map_err(|e| invalid(node, &format!("invalid test-command '{command}': {e}")))?;
    if programs.is_empty() {
        return Err(invalid(node, "'test-command' must run at least one program"));
    }
    tracing::debug!(?programs, "test-command override parsed");
    Ok(())
}
