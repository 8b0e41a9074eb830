//! Commit records parsed from `git log` output, with conventional commit parsing.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::warn;

/// Pattern: type(scope)!: description, type!: description, type(scope): description or type: description
static CONVENTIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(\((.+)\))?!?:").expect("valid conventional commit regex"));

/// `git log` pretty format: short hash, author name, author email, subject.
pub const LOG_FORMAT: &str = "--pretty=format:%h%x09%an%x09%ae%x09%s";

/// Conventional commit types that get classified.
///
/// Anything outside this list is treated as unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Build,
    Ci,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Build => "build",
            Self::Ci => "ci",
        }
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            _ => Err(format!("Unclassified commit type: {}", s)),
        }
    }
}

/// The leading `type(scope)` token of a conventional commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalPrefix {
    pub kind: String,
    pub scope: Option<String>,
}

/// Parse the conventional commit prefix of a message, whatever its type.
pub fn parse_prefix(message: &str) -> Option<ConventionalPrefix> {
    let first_line = message.lines().next().unwrap_or("");
    let caps = CONVENTIONAL_RE.captures(first_line)?;

    Some(ConventionalPrefix {
        kind: caps.get(1)?.as_str().to_string(),
        scope: caps.get(3).map(|m| m.as_str().to_string()),
    })
}

/// Parse and classify a conventional commit message.
/// Returns `None` when the prefix is missing or its type is not classified.
pub fn parse_commit_message(message: &str) -> Option<(CommitType, Option<String>)> {
    let prefix = parse_prefix(message)?;
    let commit_type = prefix.kind.parse::<CommitType>().ok()?;
    Some((commit_type, prefix.scope))
}

/// A single commit in the repository it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub repo: String,
}

impl Commit {
    pub fn new(id: impl Into<String>, message: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            repo: repo.into(),
        }
    }

    /// Classified type, if the message has an allow-listed prefix.
    pub fn commit_type(&self) -> Option<CommitType> {
        parse_commit_message(&self.message).map(|(ty, _)| ty)
    }

    /// Scope of a classified commit.
    pub fn scope(&self) -> Option<String> {
        parse_commit_message(&self.message).and_then(|(_, scope)| scope)
    }

    /// Raw type token regardless of classification (`chore`, `docs`, ...).
    pub fn raw_type(&self) -> Option<String> {
        parse_prefix(&self.message).map(|p| p.kind)
    }

    /// `type(scope)` display string, e.g. `fix(ui)`.
    pub fn type_str(&self) -> Option<String> {
        let (ty, scope) = parse_commit_message(&self.message)?;
        Some(match scope {
            Some(scope) => format!("{}({})", ty.as_str(), scope),
            None => ty.as_str().to_string(),
        })
    }
}

/// A commit together with its author, as read from one log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub commit: Commit,
    pub author: String,
    pub email: String,
}

/// Parse `git log` output produced with [`LOG_FORMAT`].
///
/// Lines that do not carry all four fields are skipped with a warning.
pub fn parse_log(output: &str, repo: &str) -> Vec<LogEntry> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut fields = line.splitn(4, '\t');
            match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(id), Some(author), Some(email), Some(subject)) => Some(LogEntry {
                    commit: Commit::new(id, subject, repo),
                    author: author.to_string(),
                    email: email.to_string(),
                }),
                _ => {
                    warn!(repo, line, "Skipping malformed git log line");
                    None
                }
            }
        })
        .collect()
}
