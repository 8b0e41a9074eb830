//! Commit range handling.
//!
//! Ranges are written `<old>...<new>`. An empty range means all history.
//! `git submodule summary` reports an all-zero hash on the old side when a
//! submodule was added and on the new side when it was removed.

use std::fmt;

use crate::error::GitError;

/// A commit range as passed to `git log`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitRange {
    bounds: Option<(String, String)>,
}

fn is_zero_hash(hash: &str) -> bool {
    !hash.is_empty() && hash.chars().all(|c| c == '0')
}

impl CommitRange {
    /// The whole history of a repository.
    pub fn full() -> Self {
        Self::default()
    }

    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            bounds: Some((old.into(), new.into())),
        }
    }

    /// Parse `<old>...<new>` (or `<old>..<new>`). Empty input is the full history.
    pub fn parse(s: &str) -> Result<Self, GitError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::full());
        }

        let (old, new) = s
            .split_once("...")
            .or_else(|| s.split_once(".."))
            .ok_or_else(|| GitError::InvalidRange(s.to_string()))?;

        if old.is_empty() || new.is_empty() || new.contains("..") {
            return Err(GitError::InvalidRange(s.to_string()));
        }

        Ok(Self::new(old, new))
    }

    pub fn old(&self) -> Option<&str> {
        self.bounds.as_ref().map(|(old, _)| old.as_str())
    }

    pub fn new_ref(&self) -> Option<&str> {
        self.bounds.as_ref().map(|(_, new)| new.as_str())
    }

    pub fn is_full(&self) -> bool {
        self.bounds.is_none()
    }

    /// The submodule no longer exists at the new side of the range.
    pub fn is_removed(&self) -> bool {
        self.new_ref().is_some_and(is_zero_hash)
    }

    /// The submodule did not exist at the old side of the range.
    pub fn is_added(&self) -> bool {
        self.old().is_some_and(is_zero_hash)
    }

    /// Range to hand to `git log`: newly added submodules cover their whole history.
    pub fn effective(&self) -> Self {
        if self.is_added() {
            Self::full()
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bounds {
            Some((old, new)) => write!(f, "{}...{}", old, new),
            None => Ok(()),
        }
    }
}
