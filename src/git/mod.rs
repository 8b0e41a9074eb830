//! Git operations: `git` subprocesses for history, git2 for tags.

pub mod command;
pub mod commits;
pub mod range;
pub mod submodule;
pub mod tags;

pub use command::{check_git_installed, GitCli, GitCommands};
pub use commits::{parse_commit_message, parse_log, parse_prefix, Commit, CommitType, ConventionalPrefix, LogEntry};
pub use range::CommitRange;
pub use submodule::{parse_submodule_summary, SubmoduleChange};
pub use tags::{default_range, get_latest_tag};
