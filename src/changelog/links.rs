//! Markdown link rendering for commit messages.
//!
//! Issue references (`#123`), short hashes and GitHub issue/PR URLs are
//! turned into links scoped to the repository the commit belongs to.

use regex_lite::{Captures, Regex};

use crate::git::Commit;

/// Renders links into the GitHub organisation that hosts every repository.
#[derive(Debug, Clone)]
pub struct Linker {
    org: String,
    url_re: Regex,
    issue_re: Regex,
    hash_re: Regex,
}

impl Linker {
    pub fn new(org: &str) -> Self {
        let url_pattern = format!(
            r"(^|[^(\-])https://github\.com/{}/([\w\-]+)/(issues|pulls|pull)/(\d+)",
            regex_lite::escape(org)
        );

        Self {
            org: org.to_string(),
            url_re: Regex::new(&url_pattern).expect("valid issue url regex"),
            issue_re: Regex::new(r"(^|[^\[&])#(\d+)\b").expect("valid issue regex"),
            hash_re: Regex::new(r"(^|[\s(])([0-9a-f]{7})\b").expect("valid hash regex"),
        }
    }

    pub fn issue_url(&self, repo: &str, number: &str) -> String {
        format!("https://github.com/{}/{}/issues/{}", self.org, repo, number)
    }

    pub fn commit_url(&self, repo: &str, id: &str) -> String {
        format!("https://github.com/{}/{}/commit/{}", self.org, repo, id)
    }

    pub fn commit_link(&self, repo: &str, id: &str) -> String {
        format!("[`{}`]({})", id, self.commit_url(repo, id))
    }

    /// Replace references in `message` with markdown links into `repo`.
    pub fn linkify(&self, message: &str, repo: &str) -> String {
        let s = self.url_re.replace_all(message, |caps: &Captures| {
            format!(
                "{}[#{}]({})",
                &caps[1],
                &caps[4],
                self.issue_url(&caps[2], &caps[4])
            )
        });

        let s = self.issue_re.replace_all(&s, |caps: &Captures| {
            format!("{}[#{}]({})", &caps[1], &caps[2], self.issue_url(repo, &caps[2]))
        });

        let s = self.hash_re.replace_all(&s, |caps: &Captures| {
            let hash = &caps[2];
            if hash.chars().all(|c| c.is_ascii_digit()) {
                return caps[0].to_string();
            }
            format!("{}{}", &caps[1], self.commit_link(repo, hash))
        });

        s.into_owned()
    }

    /// Changelog line for a commit: linked message followed by a link to the commit.
    pub fn format_commit(&self, commit: &Commit) -> String {
        let message = self.linkify(&commit.message, &commit.repo);
        if commit.id.is_empty() {
            message
        } else {
            format!("{} ({})", message, self.commit_link(&commit.repo, &commit.id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linker() -> Linker {
        Linker::new("ActivityWatch")
    }

    #[test]
    fn test_issue_reference_links_to_owning_repo() {
        let out = linker().linkify("fix: crash on startup (#123)", "aw-server");
        assert_eq!(
            out,
            "fix: crash on startup ([#123](https://github.com/ActivityWatch/aw-server/issues/123))"
        );
    }

    #[test]
    fn test_issue_reference_after_word() {
        let out = linker().linkify("fix: regression from PR#12", "aw-core");
        assert_eq!(
            out,
            "fix: regression from PR[#12](https://github.com/ActivityWatch/aw-core/issues/12)"
        );
    }

    #[test]
    fn test_linked_issue_and_entity_left_alone() {
        let msg = "docs: see [#7](https://example.com) and &#8217;";
        assert_eq!(linker().linkify(msg, "aw-core"), msg);
    }

    #[test]
    fn test_cross_repo_url_becomes_local_link() {
        let out = linker().linkify(
            "fix: see https://github.com/ActivityWatch/aw-core/issues/42",
            "aw-server",
        );
        assert_eq!(
            out,
            "fix: see [#42](https://github.com/ActivityWatch/aw-core/issues/42)"
        );
    }

    #[test]
    fn test_url_inside_parentheses_is_left_alone() {
        let msg = "docs: [link](https://github.com/ActivityWatch/aw-core/issues/42)";
        assert_eq!(linker().linkify(msg, "aw-server"), msg);
    }

    #[test]
    fn test_short_hash_links_to_commit() {
        let out = linker().linkify("revert: undo 0c14d77 for now", "aw-webui");
        assert_eq!(
            out,
            "revert: undo [`0c14d77`](https://github.com/ActivityWatch/aw-webui/commit/0c14d77) for now"
        );
    }

    #[test]
    fn test_numbers_are_not_hashes() {
        let msg = "chore: bump year to (2023100)";
        assert_eq!(linker().linkify(msg, "aw-webui"), msg);
    }

    #[test]
    fn test_plain_message_unchanged() {
        let msg = "feat: add dark mode";
        assert_eq!(linker().linkify(msg, "aw-webui"), msg);
    }

    #[test]
    fn test_format_commit_appends_commit_link() {
        let commit = Commit::new("abc1234", "feat: add X", "aw-qt");
        assert_eq!(
            linker().format_commit(&commit),
            "feat: add X ([`abc1234`](https://github.com/ActivityWatch/aw-qt/commit/abc1234))"
        );
    }

    #[test]
    fn test_format_commit_without_id() {
        let commit = Commit::new("", "feat: add X", "aw-qt");
        assert_eq!(linker().format_commit(&commit), "feat: add X");
    }
}
