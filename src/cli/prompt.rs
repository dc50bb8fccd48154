use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 60;

/// Ask for the project path on an interactive terminal.
///
/// Returns `Ok(None)` on empty input (or EOF) so the caller falls back to the
/// current directory. Surrounding whitespace is trimmed.
pub(crate) fn ask_project_path(
    cwd: &Path,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<PathBuf>> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "  Pre-commit hook setup")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;
    writeln!(out, "Current directory: {}", cwd.display())?;
    writeln!(out)?;
    write!(out, "Project path (Enter for current directory): ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    writeln!(out)?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(trimmed)))
    }
}
