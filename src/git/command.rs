//! Git subprocess invocations.
//!
//! Commit listing and submodule summaries shell out to the system `git`
//! binary, which has no git2 equivalent for `submodule summary`.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

use super::commits::LOG_FORMAT;
use super::range::CommitRange;

/// The git queries the summarizer needs.
pub trait GitCommands {
    /// `git log` output for `range`, formatted with [`LOG_FORMAT`].
    fn log(&self, path: &Path, range: &CommitRange) -> Result<String, GitError>;

    /// `git submodule summary [<base>]` output.
    fn submodule_summary(&self, path: &Path, base: Option<&str>) -> Result<String, GitError>;

    /// Name of the repository at `path`, i.e. its directory name.
    fn repo_name(&self, path: &Path) -> Result<String, GitError> {
        let resolved = std::fs::canonicalize(path).map_err(|source| GitError::RepoName {
            path: path.display().to_string(),
            source,
        })?;

        Ok(resolved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| resolved.display().to_string()))
    }
}

/// Runs the system `git` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCommands for GitCli {
    fn log(&self, path: &Path, range: &CommitRange) -> Result<String, GitError> {
        let range_arg = range.to_string();
        let mut args = vec!["log"];
        if !range_arg.is_empty() {
            args.push(range_arg.as_str());
        }
        args.extend(["--no-decorate", LOG_FORMAT]);

        run_git(path, &args)
    }

    fn submodule_summary(&self, path: &Path, base: Option<&str>) -> Result<String, GitError> {
        let mut args = vec!["submodule", "summary"];
        args.extend(base);

        run_git(path, &args)
    }
}

/// Check that git is installed and accessible.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map_err(|_| GitError::NotInstalled)?;
    Ok(())
}

/// Run a git command in `cwd` and return its stdout.
///
/// A non-zero exit is an error carrying everything git printed.
pub fn run_git(cwd: &Path, args: &[&str]) -> Result<String, GitError> {
    let command = format!("git {}", args.join(" "));
    debug!(cwd = %cwd.display(), %command, "Running git");

    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(GitError::SpawnFailed)?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed {
            command,
            cwd: cwd.display().to_string(),
            code: output.status.code(),
            output: format!("{}{}", stdout, stderr).trim().to_string(),
        });
    }

    Ok(stdout)
}
