use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = "pytest.ini";

/// Written when the project has no `pytest.ini`; puts the project root on
/// `sys.path` so tests can import the package without installing it.
pub const DEFAULT_CONTENTS: &str = "[pytest]\npythonpath = .\n";

pub fn path(root: &Path) -> PathBuf {
    root.join(FILE_NAME)
}

/// Create `pytest.ini` under `root` unless something by that name exists.
///
/// Returns `Ok(true)` when the file was created. An existing file is never
/// read or modified.
pub fn ensure(root: &Path) -> std::io::Result<bool> {
    let path = path(root);
    if path.exists() {
        tracing::debug!(path = %path.display(), "pytest.ini already present");
        return Ok(false);
    }
    std::fs::write(&path, DEFAULT_CONTENTS)?;
    tracing::debug!(path = %path.display(), "pytest.ini created");
    Ok(true)
}
