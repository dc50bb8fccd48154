use std::path::{Component, Path, PathBuf};

/// Name of the git metadata directory that must exist under the project root.
pub const GIT_DIR: &str = ".git";

/// Reasons a target path cannot be configured.
///
/// The first three are the preconditions, checked in order before anything
/// is written.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ProjectError {
    #[error("path does not exist: {}", .0.display())]
    #[diagnostic(code(setup_pre_commit::path_not_found))]
    PathNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    #[diagnostic(code(setup_pre_commit::not_a_directory))]
    NotADirectory(PathBuf),

    #[error("not a git repository: {}", .0.display())]
    #[diagnostic(
        code(setup_pre_commit::not_a_git_repository),
        help("make sure the directory contains a .git folder")
    )]
    NotAGitRepository(PathBuf),

    /// `$HOME` is not set but the path starts with `~`.
    #[error("$HOME not set, cannot expand '~' in path: {0}")]
    #[diagnostic(code(setup_pre_commit::home_not_set))]
    HomeNotSet(String),

    /// The generated script is UTF-8, so the root must be representable in it.
    #[error("path is not valid UTF-8: {}", .0.display())]
    #[diagnostic(code(setup_pre_commit::non_utf8_path))]
    NonUtf8Path(PathBuf),

    #[error("cannot resolve path: {}", path.display())]
    #[diagnostic(code(setup_pre_commit::resolve))]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot determine the current directory")]
    #[diagnostic(code(setup_pre_commit::current_dir))]
    CurrentDir(#[source] std::io::Error),
}

/// An absolute project directory that passed every precondition.
///
/// Constructed via [`ProjectRoot::resolve`] which returns `Result`. Holding a
/// `ProjectRoot` means the directory existed and contained `.git` when it was
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Resolve an optional user-supplied path against `cwd` and check it.
    ///
    /// Steps:
    /// 1. Expand a leading `~` component to `$HOME`
    /// 2. Join relative paths onto `cwd` (absolute paths replace it)
    /// 3. Resolve through the filesystem, so `link/..` lands where the OS says
    /// 4. Check existence, directory-ness, then `.git`, in that order
    ///
    /// With `raw == None` the project is `cwd` itself. A missing path is
    /// reported with `.` and `..` collapsed lexically.
    pub fn resolve(raw: Option<&Path>, cwd: &Path) -> Result<Self, ProjectError> {
        let joined = match raw {
            Some(raw) => cwd.join(expand_home(raw)?),
            None => cwd.to_path_buf(),
        };

        if !joined.exists() {
            return Err(ProjectError::PathNotFound(normalize(&joined)));
        }
        let path = canonicalize(&joined)?;
        if !path.is_dir() {
            return Err(ProjectError::NotADirectory(path));
        }
        // A `.git` file (worktree, submodule) has no hooks directory to write into.
        if !path.join(GIT_DIR).is_dir() {
            return Err(ProjectError::NotAGitRepository(path));
        }
        if path.to_str().is_none() {
            return Err(ProjectError::NonUtf8Path(path));
        }

        tracing::debug!(root = %path.display(), "project root resolved");
        Ok(ProjectRoot(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

/// The process working directory, mapped into a [`ProjectError`].
pub fn current_dir() -> Result<PathBuf, ProjectError> {
    std::env::current_dir().map_err(ProjectError::CurrentDir)
}

fn expand_home(raw: &Path) -> Result<PathBuf, ProjectError> {
    let Ok(rest) = raw.strip_prefix("~") else {
        return Ok(raw.to_path_buf());
    };
    let home = std::env::var_os("HOME")
        .ok_or_else(|| ProjectError::HomeNotSet(raw.display().to_string()))?;
    Ok(PathBuf::from(home).join(rest))
}

#[cfg(unix)]
fn canonicalize(path: &Path) -> Result<PathBuf, ProjectError> {
    std::fs::canonicalize(path).map_err(|source| ProjectError::Resolve {
        path: normalize(path),
        source,
    })
}

/// Windows canonical paths carry a `\\?\` prefix that bash cannot `cd` into.
#[cfg(not(unix))]
fn canonicalize(path: &Path) -> Result<PathBuf, ProjectError> {
    Ok(normalize(path))
}

/// Collapse `.` and `..` without touching the filesystem.
///
/// `..` at the root stays at the root. Trailing separators disappear because
/// the path is rebuilt from its components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(GIT_DIR)).unwrap();
        tmp
    }

    fn canonical(path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap()
    }

    // ---- normalize ----

    #[test]
    fn normalize_absolute_path_unchanged() {
        assert_eq!(
            normalize(Path::new("/absolute/path")),
            PathBuf::from("/absolute/path")
        );
    }

    #[test]
    fn normalize_dotdot_collapses() {
        assert_eq!(
            normalize(Path::new("/foo/bar/../baz")),
            PathBuf::from("/foo/baz")
        );
    }

    #[test]
    fn normalize_dot_segments_removed() {
        assert_eq!(
            normalize(Path::new("/foo/./bar/.")),
            PathBuf::from("/foo/bar")
        );
    }

    #[test]
    fn normalize_trailing_slash_removed() {
        assert_eq!(normalize(Path::new("/path/")), PathBuf::from("/path"));
    }

    #[test]
    fn normalize_dotdot_at_root_stays_root() {
        assert_eq!(normalize(Path::new("/../..")), PathBuf::from("/"));
    }

    // ---- expand_home ----

    #[test]
    fn expand_home_leaves_plain_paths_alone() {
        assert_eq!(
            expand_home(Path::new("relative/dir")).unwrap(),
            PathBuf::from("relative/dir")
        );
    }

    #[test]
    fn expand_home_replaces_leading_tilde() {
        let home = std::env::var("HOME").unwrap();
        assert_eq!(
            expand_home(Path::new("~/project")).unwrap(),
            PathBuf::from(home).join("project")
        );
    }

    #[test]
    fn expand_home_ignores_tilde_inside_name() {
        assert_eq!(
            expand_home(Path::new("~backup/dir")).unwrap(),
            PathBuf::from("~backup/dir")
        );
    }

    // ---- resolve ----

    #[test]
    fn resolve_without_path_uses_cwd() {
        let tmp = git_project();
        let root = ProjectRoot::resolve(None, tmp.path()).unwrap();
        assert_eq!(root.path(), canonical(tmp.path()));
    }

    #[test]
    fn resolve_relative_path_joins_cwd() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("app");
        fs::create_dir_all(project.join(GIT_DIR)).unwrap();

        let root = ProjectRoot::resolve(Some(Path::new("./app")), tmp.path()).unwrap();
        assert_eq!(root.path(), canonical(&project));
    }

    #[test]
    fn resolve_absolute_path_ignores_cwd() {
        let tmp = git_project();
        let root = ProjectRoot::resolve(Some(tmp.path()), Path::new("/somewhere/else")).unwrap();
        assert_eq!(root.path(), canonical(tmp.path()));
    }

    #[test]
    fn resolve_collapses_parent_components() {
        let tmp = git_project();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let root = ProjectRoot::resolve(Some(Path::new("sub/..")), tmp.path()).unwrap();
        assert_eq!(root.path(), canonical(tmp.path()));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_parent_of_symlink_follows_the_link_target() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let other = tmp.path().join("other");
        fs::create_dir_all(a.join(GIT_DIR)).unwrap();
        fs::create_dir_all(other.join(GIT_DIR)).unwrap();
        fs::create_dir(other.join("inner")).unwrap();
        std::os::unix::fs::symlink(other.join("inner"), a.join("link")).unwrap();

        let root = ProjectRoot::resolve(Some(Path::new("link/..")), &a).unwrap();
        assert_eq!(root.path(), canonical(&other));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_symlinked_project_uses_target() {
        let tmp = git_project();
        let link = TempDir::new().unwrap();
        let alias = link.path().join("alias");
        std::os::unix::fs::symlink(tmp.path(), &alias).unwrap();

        let root = ProjectRoot::resolve(Some(&alias), Path::new("/")).unwrap();
        assert_eq!(root.path(), canonical(tmp.path()));
    }

    // Linux filesystems accept arbitrary bytes in names; macOS does not.
    #[cfg(target_os = "linux")]
    #[test]
    fn resolve_non_utf8_root_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join(OsStr::from_bytes(b"caf\xe9"));
        fs::create_dir_all(project.join(GIT_DIR)).unwrap();

        let err = ProjectRoot::resolve(Some(&project), Path::new("/")).unwrap_err();
        assert!(matches!(err, ProjectError::NonUtf8Path(_)));
    }

    #[test]
    fn resolve_missing_path_is_path_not_found() {
        let tmp = TempDir::new().unwrap();
        let err =
            ProjectRoot::resolve(Some(Path::new("./sub/../missing")), tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::PathNotFound(p) if p == tmp.path().join("missing")));
    }

    #[test]
    fn resolve_file_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("file.txt"), "x").unwrap();

        let err = ProjectRoot::resolve(Some(Path::new("file.txt")), tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotADirectory(_)));
    }

    #[test]
    fn resolve_directory_without_git_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = ProjectRoot::resolve(None, tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotAGitRepository(_)));
    }

    #[test]
    fn resolve_git_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(GIT_DIR), "gitdir: ../elsewhere").unwrap();

        let err = ProjectRoot::resolve(None, tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotAGitRepository(_)));
    }

    #[test]
    fn error_messages_name_the_path() {
        let err = ProjectError::NotAGitRepository(PathBuf::from("/repo"));
        assert_eq!(err.to_string(), "not a git repository: /repo");
    }
}
