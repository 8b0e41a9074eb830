//! Persisted username → emails table.
//!
//! Stored as one tab-separated line per username: `username\temail\temail...`.
//! The file is committed alongside the project so later runs skip lookups
//! that already succeeded. It is rewritten in full, sorted, on every save.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use tracing::info;

use crate::changelog::writer::write_atomic;
use crate::error::ContributorError;

/// Default location of the contributor cache.
pub const DEFAULT_CACHE_PATH: &str = "scripts/changelog_contributors.csv";

/// Known usernames and the emails they commit with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorTable {
    users: BTreeMap<String, BTreeSet<String>>,
}

impl ContributorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with hardcoded `(username, emails)` entries.
    pub fn with_overrides(overrides: &[(String, Vec<String>)]) -> Self {
        let mut table = Self::new();
        for (user, emails) in overrides {
            for email in emails {
                table.add(user, email);
            }
        }
        table
    }

    /// Record that `username` commits as `email`.
    pub fn add(&mut self, username: &str, email: &str) {
        self.users
            .entry(username.to_string())
            .or_default()
            .insert(email.to_string());
    }

    pub fn emails(&self, username: &str) -> Option<&BTreeSet<String>> {
        self.users.get(username)
    }

    /// Whether any username already claims `email`.
    pub fn is_resolved(&self, email: &str) -> bool {
        self.users.values().any(|emails| emails.contains(email))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Reverse lookup. An email claimed by several usernames maps to the last one in sort order.
    pub fn email_to_username(&self) -> HashMap<&str, &str> {
        let mut map = HashMap::new();
        for (user, emails) in &self.users {
            for email in emails {
                map.insert(email.as_str(), user.as_str());
            }
        }
        map
    }

    /// Merge entries parsed from cache file content.
    pub fn merge_str(&mut self, content: &str) {
        for line in content.lines().filter(|l| !l.is_empty()) {
            let mut fields = line.split('\t');
            let Some(user) = fields.next() else {
                continue;
            };
            let entry = self.users.entry(user.to_string()).or_default();
            entry.extend(fields.filter(|e| !e.is_empty()).map(str::to_string));
        }
    }

    /// Merge the cache file at `path`; a missing file leaves the table unchanged.
    pub fn load(&mut self, path: &Path) -> Result<(), ContributorError> {
        if !path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(path).map_err(ContributorError::ReadFailed)?;
        self.merge_str(&content);
        info!("Read {} contributors from {}", self.len(), path.display());
        Ok(())
    }

    /// Serialize in cache file format, sorted by username then email.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for (user, emails) in &self.users {
            out.push_str(user);
            for email in emails {
                out.push('\t');
                out.push_str(email);
            }
            out.push('\n');
        }
        out
    }

    /// Rewrite the cache file at `path` with the whole table.
    pub fn save(&self, path: &Path) -> Result<(), ContributorError> {
        write_atomic(path, &self.to_tsv()).map_err(ContributorError::WriteFailed)?;
        info!("Wrote {} contributors to {}", self.len(), path.display());
        Ok(())
    }
}
