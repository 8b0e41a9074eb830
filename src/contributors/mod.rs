//! Contributor attribution: cached table plus GitHub lookups.

pub mod resolver;
pub mod table;

pub use resolver::{
    credited_usernames, fetch_social_handles, resolve_contributors, resolve_email,
    resolve_offline, username_from_noreply,
};
pub use table::{ContributorTable, DEFAULT_CACHE_PATH};
