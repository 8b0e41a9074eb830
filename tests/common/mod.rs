//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use bundlelog::{CommitRange, GitCommands, GitError};
use git2::{Oid, Repository, Signature};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a commit as the default test user. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        self.commit_as(message, "Test User", "test@example.com")
    }

    /// Create a commit with the given author.
    pub fn commit_as(&self, message: &str, name: &str, email: &str) -> Oid {
        let sig = Signature::now(name, email).expect("Failed to create signature");

        let file_path = self.dir.path().join("test.txt");
        let content = format!(
            "{}\n{}",
            message,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        std::fs::write(&file_path, content).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(Path::new("test.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    /// Create an annotated tag pointing to the given OID.
    pub fn tag_annotated(&self, name: &str, oid: Oid, message: &str) {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag(name, &obj, &sig, message, false)
            .expect("Failed to create annotated tag");
    }

    /// Name of the currently checked out branch.
    pub fn head_branch(&self) -> String {
        self.repo
            .head()
            .expect("Failed to read HEAD")
            .shorthand()
            .expect("HEAD has no name")
            .to_string()
    }
}

/// Run `git` in `dir` as the test user, panicking on failure. Returns stdout.
///
/// Local paths are allowed as submodule URLs.
pub fn git_in(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Test User",
            "-c",
            "user.email=test@example.com",
            "-c",
            "protocol.file.allow=always",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Build a `git log` line in the format the summarizer reads.
pub fn log_line(id: &str, email: &str, subject: &str) -> String {
    format!("{}\tSome Author\t{}\t{}", id, email, subject)
}

/// Canned git output keyed by repository path.
#[derive(Default)]
pub struct FakeGit {
    logs: HashMap<PathBuf, String>,
    summaries: HashMap<PathBuf, String>,
    /// Every `git log` call as (path, range).
    pub log_calls: RefCell<Vec<(PathBuf, CommitRange)>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(mut self, path: &str, lines: &[String]) -> Self {
        self.logs.insert(PathBuf::from(path), lines.join("\n"));
        self
    }

    pub fn with_summary(mut self, path: &str, output: &str) -> Self {
        self.summaries.insert(PathBuf::from(path), output.to_string());
        self
    }
}

impl GitCommands for FakeGit {
    fn log(&self, path: &Path, range: &CommitRange) -> Result<String, GitError> {
        self.log_calls
            .borrow_mut()
            .push((path.to_path_buf(), range.clone()));
        self.logs
            .get(path)
            .cloned()
            .ok_or_else(|| GitError::CommandFailed {
                command: format!("git log {}", range),
                cwd: path.display().to_string(),
                code: Some(128),
                output: "fatal: not a git repository".to_string(),
            })
    }

    fn submodule_summary(&self, path: &Path, _base: Option<&str>) -> Result<String, GitError> {
        Ok(self.summaries.get(path).cloned().unwrap_or_default())
    }

    fn repo_name(&self, path: &Path) -> Result<String, GitError> {
        Ok(path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()))
    }
}
