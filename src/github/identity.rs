//! GitHub user lookups via octocrab.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

use crate::error::GitHubError;

/// A user record from the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub login: String,
}

/// Response of `GET /search/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearchResults {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<UserRecord>,
}

/// The parts of `GET /users/{login}` we use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub twitter_username: Option<String>,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
}

/// Remote identity lookups, mockable for tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Search users by public email address.
    async fn search_users_by_email(&self, email: &str) -> Result<UserSearchResults, GitHubError>;

    /// Fetch a user's public profile.
    async fn user_profile(&self, login: &str) -> Result<UserProfile, GitHubError>;
}

/// [`IdentityService`] backed by the GitHub REST API.
pub struct GitHubIdentity {
    client: Octocrab,
}

impl GitHubIdentity {
    /// Build a client, authenticated when a token is given.
    pub fn new(token: Option<String>) -> Result<Self, GitHubError> {
        let builder = Octocrab::builder();
        let builder = match token {
            Some(token) => builder.personal_token(token),
            None => builder,
        };
        let client = builder
            .build()
            .map_err(|e| GitHubError::Client(Box::new(e)))?;
        Ok(Self { client })
    }

    /// Use a pre-configured client, e.g. one pointed at a mock server.
    pub fn with_client(client: Octocrab) -> Self {
        Self { client }
    }
}

/// GitHub signals an exhausted rate limit with 403.
fn map_error(e: octocrab::Error) -> GitHubError {
    if let octocrab::Error::GitHub { source, .. } = &e {
        if source.status_code.as_u16() == 403
            || source.message.to_lowercase().contains("rate limit")
        {
            return GitHubError::RateLimited;
        }
    }
    GitHubError::Request(Box::new(e))
}

#[async_trait]
impl IdentityService for GitHubIdentity {
    async fn search_users_by_email(&self, email: &str) -> Result<UserSearchResults, GitHubError> {
        let q = format!("{} in:email", email);
        self.client
            .get("/search/users", Some(&SearchQuery { q: &q }))
            .await
            .map_err(map_error)
    }

    async fn user_profile(&self, login: &str) -> Result<UserProfile, GitHubError> {
        self.client
            .get(format!("/users/{}", login), None::<&()>)
            .await
            .map_err(map_error)
    }
}
