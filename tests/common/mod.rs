// Shared test helpers for integration tests.
// Used by cli_contract.rs and cli_flows.rs.
#![allow(dead_code)]

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_setup-pre-commit"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Runs the binary from `cwd` with the given args and a closed stdin, so the
/// interactive prompt never triggers.
/// Returns (stdout, stderr, exit_code).
pub fn run_tool(cwd: &Path, args: &[&str]) -> (String, String, i32) {
    let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
    run_tool_os(cwd, &args)
}

/// Like [`run_tool`] but for arguments that need not be UTF-8.
pub fn run_tool_os(cwd: &Path, args: &[&OsStr]) -> (String, String, i32) {
    let output = Command::new(binary_path())
        .args(args)
        .current_dir(cwd)
        .env_remove("SETUP_PRE_COMMIT_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to execute binary");

    let stdout = String::from_utf8(output.stdout).expect("stdout not valid UTF-8");
    let stderr = String::from_utf8(output.stderr).expect("stderr not valid UTF-8");
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, stderr, exit_code)
}

/// Runs the binary against `project` passed as an absolute path argument.
pub fn run_on(project: &Path, extra_args: &[&str]) -> (String, String, i32) {
    let project_arg = project.to_str().expect("temp path not UTF-8").to_string();
    let mut args = vec![project_arg.as_str()];
    args.extend_from_slice(extra_args);
    run_tool(project.parent().unwrap_or(project), &args)
}

/// A temp project containing `.git` plus the given directories and empty files.
pub fn git_project(dirs: &[&str], files: &[&str]) -> TempDir {
    let tmp = plain_dir(dirs, files);
    fs::create_dir(tmp.path().join(".git")).expect("failed to create .git");
    tmp
}

/// A temp directory without `.git`.
pub fn plain_dir(dirs: &[&str], files: &[&str]) -> TempDir {
    let tmp = TempDir::new().expect("failed to create temp dir");
    for dir in dirs {
        fs::create_dir_all(tmp.path().join(dir)).expect("failed to create dir");
    }
    for file in files {
        fs::write(tmp.path().join(file), "").expect("failed to create file");
    }
    tmp
}

pub fn hook_path(project: &Path) -> PathBuf {
    project.join(".git").join("hooks").join("pre-commit")
}

pub fn read_hook(project: &Path) -> String {
    fs::read_to_string(hook_path(project)).expect("hook should exist")
}

/// Every entry under `dir`, recursively, relative and sorted.
pub fn snapshot(dir: &Path) -> Vec<PathBuf> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            out.push(path.strip_prefix(base).unwrap_or(&path).to_path_buf());
            if path.is_dir() {
                walk(base, &path, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

pub fn parse_report(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout.trim()).expect("stdout should be valid JSON")
}
