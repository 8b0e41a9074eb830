//! Recursive repository summarization.
//!
//! Lists the commits of a repository within a range, buckets them by
//! conventional commit type and recurses into every submodule whose
//! pointer moved, using the range reported by `git submodule summary`.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::info;

use crate::error::GitError;
use crate::git::{parse_log, parse_submodule_summary, Commit, CommitRange, CommitType, GitCommands};

/// Commit types left out of the misc bucket by default.
pub const DEFAULT_FILTER_TYPES: [&str; 4] = ["build", "ci", "tests", "test"];

/// Every distinct committer email seen during a traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorEmails(BTreeSet<String>);

impl ContributorEmails {
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        self.0.insert(email.into())
    }

    pub fn contains(&self, email: &str) -> bool {
        self.0.contains(email)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ContributorEmails {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Changes of one repository and, nested, of its submodules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepoSection {
    pub name: String,
    pub features: Vec<Commit>,
    pub fixes: Vec<Commit>,
    pub misc: Vec<Commit>,
    pub subsections: Vec<RepoSection>,
}

impl RepoSection {
    /// Number of commits listed in this section, excluding subsections.
    pub fn len(&self) -> usize {
        self.features.len() + self.fixes.len() + self.misc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of a traversal: the section tree and the emails collected on the way.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub section: Option<RepoSection>,
    pub contributors: ContributorEmails,
}

/// Options controlling how commits are bucketed and sections ordered.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    /// Raw commit types that never land in the misc bucket.
    pub filter_types: BTreeSet<String>,
    /// Submodules listed first, in this order.
    pub repo_order: Vec<String>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            filter_types: DEFAULT_FILTER_TYPES.iter().map(|s| s.to_string()).collect(),
            repo_order: Vec::new(),
        }
    }
}

/// Walks a repository tree through a [`GitCommands`] implementation.
pub struct Summarizer<'a, G: GitCommands + ?Sized> {
    git: &'a G,
    options: &'a SummaryOptions,
}

impl<'a, G: GitCommands + ?Sized> Summarizer<'a, G> {
    pub fn new(git: &'a G, options: &'a SummaryOptions) -> Self {
        Self { git, options }
    }

    /// Summarize the repository at `path` and all submodules below it.
    ///
    /// Contributor emails are only complete once this returns.
    pub fn summarize(&self, path: &Path, range: &CommitRange) -> Result<Summary, GitError> {
        let mut contributors = ContributorEmails::default();
        let section = self.summarize_repo(path, range, &mut contributors)?;
        Ok(Summary {
            section,
            contributors,
        })
    }

    fn summarize_repo(
        &self,
        path: &Path,
        range: &CommitRange,
        contributors: &mut ContributorEmails,
    ) -> Result<Option<RepoSection>, GitError> {
        if range.is_removed() {
            info!(path = %path.display(), "Submodule was removed, skipping");
            return Ok(None);
        }
        let range = range.effective();

        let name = self.git.repo_name(path)?;
        let mut section = RepoSection {
            name: name.clone(),
            ..Default::default()
        };

        let log = self.git.log(path, &range)?;
        for entry in parse_log(&log, &name) {
            contributors.insert(entry.email);

            let commit = entry.commit;
            match commit.commit_type() {
                Some(CommitType::Feat) => section.features.push(commit),
                Some(CommitType::Fix) => section.fixes.push(commit),
                _ => {
                    let filtered = commit
                        .raw_type()
                        .is_some_and(|ty| self.options.filter_types.contains(&ty));
                    if !filtered {
                        section.misc.push(commit);
                    }
                }
            }
        }

        let summary = self.git.submodule_summary(path, range.old())?;
        let mut subrepos: Vec<(String, Option<RepoSection>)> = Vec::new();

        for change in parse_submodule_summary(&summary) {
            info!(
                "Found {}, looking up range: {} ({} commits)",
                change.name,
                change.range,
                change.count.map_or("?".to_string(), |c| c.to_string())
            );

            let sub = self.summarize_repo(&path.join(&change.name), &change.range, contributors)?;
            match subrepos.iter_mut().find(|(n, _)| *n == change.name) {
                Some(existing) => existing.1 = sub,
                None => subrepos.push((change.name, sub)),
            }
        }

        for name in &self.options.repo_order {
            if let Some(pos) = subrepos.iter().position(|(n, _)| n == name) {
                let (_, sub) = subrepos.remove(pos);
                section.subsections.extend(sub);
            }
        }
        section
            .subsections
            .extend(subrepos.into_iter().filter_map(|(_, sub)| sub));

        Ok(Some(section))
    }
}
