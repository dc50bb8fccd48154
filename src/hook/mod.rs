mod template;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::project::GIT_DIR;

/// File name git looks up under `.git/hooks` before recording a commit.
pub const HOOK_NAME: &str = "pre-commit";

/// Everything the generated script depends on.
///
/// Built fresh from filesystem probes on every run; the script rendered from
/// it is a pure function of these three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookConfig {
    pub project_root: PathBuf,
    pub test_command: String,
    pub venv_dir_name: Option<String>,
}

impl HookConfig {
    /// Render the bash script for this configuration.
    pub fn render(&self) -> String {
        template::render(self)
    }

    /// `<project_root>/.git/hooks/pre-commit`.
    pub fn hook_path(&self) -> PathBuf {
        hook_path(&self.project_root)
    }
}

pub fn hook_path(root: &Path) -> PathBuf {
    root.join(GIT_DIR).join("hooks").join(HOOK_NAME)
}

/// Write the rendered script to the hook location and make it executable.
///
/// Creates `.git/hooks` if needed and replaces any existing hook without a
/// backup. Returns the path written.
pub fn install(config: &HookConfig) -> io::Result<PathBuf> {
    let path = config.hook_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&path, config.render())?;
    make_executable(&path)?;
    tracing::debug!(path = %path.display(), "hook written");
    Ok(path)
}

/// Add the owner-execute bit, keeping every other mode bit.
#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o100);
    fs::set_permissions(path, permissions)
}

/// Git for Windows runs hooks through its bundled bash regardless of mode bits.
#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
