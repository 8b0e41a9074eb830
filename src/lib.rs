//! bundlelog - A CLI tool that generates release changelogs for repositories with git submodules.
//!
//! # Overview
//!
//! bundlelog lists the commits since the previous release in a repository
//! and, recursively, in every submodule whose pointer moved. Commits are
//! grouped by conventional commit type, committers are credited by their
//! GitHub username, and the result is written as a markdown release note.

pub mod changelog;
pub mod config;
pub mod contributors;
pub mod error;
pub mod git;
pub mod github;
pub mod summary;

// Re-export commonly used types
pub use changelog::{Linker, ReleaseDocument, SectionFormat};
pub use config::ProjectConfig;
pub use contributors::ContributorTable;
pub use error::{ChangelogError, ContributorError, GitError, GitHubError};
pub use git::{Commit, CommitRange, CommitType, GitCli, GitCommands};
pub use summary::{ContributorEmails, RepoSection, Summarizer, Summary, SummaryOptions};
