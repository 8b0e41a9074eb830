//! GitHub API operations using octocrab.

pub mod auth;
pub mod identity;
pub mod retry;

pub use auth::get_github_token;
pub use identity::{GitHubIdentity, IdentityService, UserProfile, UserRecord, UserSearchResults};
pub use retry::{RateLimitBackoff, RateLimitPolicy};
