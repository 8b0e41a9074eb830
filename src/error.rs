//! Error types for bundlelog modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found in PATH. Install git and make sure it is on your PATH.")]
    NotInstalled,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("`{command}` failed in {cwd} (exit code {}):\n{output}",
            code.map_or("unknown".to_string(), |c| c.to_string()))]
    CommandFailed {
        command: String,
        cwd: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("No tag found to start the commit range from: {0}")]
    NoTag(#[source] git2::Error),

    #[error("Invalid commit range '{0}': expected <old>...<new>")]
    InvalidRange(String),

    #[error("Failed to resolve directory name of {path}: {source}")]
    RepoName {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from GitHub API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Failed to build GitHub client: {0}")]
    Client(#[source] Box<octocrab::Error>),

    #[error("Rate limited by GitHub API")]
    RateLimited,

    #[error("GitHub request failed: {0}")]
    Request(#[source] Box<octocrab::Error>),
}

/// Errors from contributor resolution and the contributor cache.
#[derive(Error, Debug)]
pub enum ContributorError {
    #[error("Failed to read contributor cache: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write contributor cache: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Contributor lookup failed for {email}: {source}")]
    LookupFailed {
        email: String,
        #[source]
        source: GitHubError,
    },
}

/// Errors from changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to write changelog: {0}")]
    WriteFailed(#[source] std::io::Error),
}
