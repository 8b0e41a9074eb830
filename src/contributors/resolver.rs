//! Email → GitHub username resolution.

use std::collections::BTreeMap;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{ContributorError, GitHubError};
use crate::github::{IdentityService, RateLimitBackoff, RateLimitPolicy, UserSearchResults};
use crate::summary::ContributorEmails;

use super::table::ContributorTable;

const NOREPLY_DOMAIN: &str = "users.noreply.github.com";

/// Username embedded in a GitHub no-reply address.
///
/// `12345+alice@users.noreply.github.com` and `alice@users.noreply.github.com`
/// both give `alice`.
pub fn username_from_noreply(email: &str) -> Option<String> {
    let (local, domain) = email.split_once('@')?;
    if domain != NOREPLY_DOMAIN {
        return None;
    }
    let username = local.split_once('+').map_or(local, |(_, name)| name);
    (!username.is_empty()).then(|| username.to_string())
}

fn first_login(email: &str, results: UserSearchResults) -> Option<String> {
    match results.total_count {
        0 => {
            info!("No match for email: {}", email);
            None
        }
        count => {
            if count > 1 {
                warn!("Multiple matches for email: {}", email);
            }
            let login = results.items.into_iter().next().map(|u| u.login);
            if let Some(login) = &login {
                info!("Contributor: @{}  (by email: {})", login, email);
            }
            login
        }
    }
}

/// Resolve a single email to a username.
///
/// Rate-limited searches are retried per `policy`; once retries run out the
/// email is left unresolved. Any other failure is returned.
pub async fn resolve_email<S>(
    service: &S,
    email: &str,
    policy: &RateLimitPolicy,
) -> Result<Option<String>, GitHubError>
where
    S: IdentityService + ?Sized,
{
    if let Some(username) = username_from_noreply(email) {
        info!("Contributor: @{}", username);
        return Ok(Some(username));
    }

    let mut backoff = RateLimitBackoff::new(policy);
    loop {
        if backoff.exhausted() {
            warn!("Backed off {} times, giving up on {}", backoff.attempts(), email);
            return Ok(None);
        }

        info!("Sending request for {}", email);
        let result = service.search_users_by_email(email).await;
        sleep(policy.request_delay).await;

        match result {
            Ok(results) => return Ok(first_login(email, results)),
            Err(GitHubError::RateLimited) => {
                warn!("Rate limit exceeded, backing off...");
                let delay = backoff.on_rate_limited();
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Usernames credited for `emails`, sorted case-insensitively.
pub fn credited_usernames(table: &ContributorTable, emails: &ContributorEmails) -> Vec<String> {
    let lookup = table.email_to_username();
    let mut usernames: Vec<String> = emails
        .iter()
        .filter_map(|email| lookup.get(email).map(|u| u.to_string()))
        .collect();
    usernames.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    usernames.dedup();
    usernames
}

/// Credit contributors without network access.
///
/// No-reply addresses are still turned into usernames and recorded in `table`.
/// Other unknown emails stay uncredited.
pub fn resolve_offline(table: &mut ContributorTable, emails: &ContributorEmails) -> Vec<String> {
    let unresolved: Vec<&str> = emails.iter().filter(|e| !table.is_resolved(e)).collect();
    for email in unresolved {
        if let Some(username) = username_from_noreply(email) {
            table.add(&username, email);
        }
    }
    credited_usernames(table, emails)
}

/// Resolve every email not yet in `table`, record the results there and
/// return the credited usernames.
pub async fn resolve_contributors<S>(
    service: &S,
    table: &mut ContributorTable,
    emails: &ContributorEmails,
    policy: &RateLimitPolicy,
) -> Result<Vec<String>, ContributorError>
where
    S: IdentityService + ?Sized,
{
    info!("Getting all contributors");

    let unresolved: Vec<&str> = emails.iter().filter(|e| !table.is_resolved(e)).collect();
    info!(count = unresolved.len(), "Resolving unknown contributor emails");

    for email in unresolved {
        let username = resolve_email(service, email, policy)
            .await
            .map_err(|source| ContributorError::LookupFailed {
                email: email.to_string(),
                source,
            })?;
        if let Some(username) = username {
            table.add(&username, email);
        }
    }

    Ok(credited_usernames(table, emails))
}

/// Twitter handles of `usernames`. Users whose profile can't be fetched are left out.
pub async fn fetch_social_handles<S>(service: &S, usernames: &[String]) -> BTreeMap<String, Option<String>>
where
    S: IdentityService + ?Sized,
{
    info!("Getting twitter of GitHub usernames");
    let mut handles = BTreeMap::new();

    for username in usernames {
        match service.user_profile(username).await {
            Ok(profile) => {
                handles.insert(username.clone(), profile.twitter_username);
            }
            Err(e) => {
                warn!("Failed to get twitter of {}: {}", username, e);
            }
        }
    }

    handles
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::github::identity::MockIdentityService;
    use crate::github::{UserProfile, UserRecord};

    fn found(logins: &[&str]) -> UserSearchResults {
        UserSearchResults {
            total_count: logins.len() as u64,
            items: logins
                .iter()
                .map(|l| UserRecord {
                    login: l.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_noreply_with_numeric_prefix() {
        assert_eq!(
            username_from_noreply("12345+alice@users.noreply.github.com").as_deref(),
            Some("alice")
        );
    }

    #[test]
    fn test_noreply_without_prefix() {
        assert_eq!(
            username_from_noreply("bob@users.noreply.github.com").as_deref(),
            Some("bob")
        );
    }

    #[test]
    fn test_regular_email_is_not_noreply() {
        assert_eq!(username_from_noreply("bob@example.com"), None);
        assert_eq!(username_from_noreply("not-an-email"), None);
    }

    #[tokio::test]
    async fn test_noreply_skips_remote_lookup() {
        let mut service = MockIdentityService::new();
        service.expect_search_users_by_email().never();

        let username = resolve_email(
            &service,
            "12345+alice@users.noreply.github.com",
            &RateLimitPolicy::immediate(2),
        )
        .await
        .unwrap();
        assert_eq!(username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_rate_limit_gives_up_after_max_attempts() {
        let mut service = MockIdentityService::new();
        service
            .expect_search_users_by_email()
            .times(2)
            .returning(|_| Err(GitHubError::RateLimited));

        let username = resolve_email(&service, "carol@example.com", &RateLimitPolicy::immediate(2))
            .await
            .unwrap();
        assert_eq!(username, None);
    }

    #[tokio::test]
    async fn test_rate_limit_then_success() {
        let mut service = MockIdentityService::new();
        let mut seq = mockall::Sequence::new();
        service
            .expect_search_users_by_email()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(GitHubError::RateLimited));
        service
            .expect_search_users_by_email()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(found(&["carol"])));

        let username = resolve_email(&service, "carol@example.com", &RateLimitPolicy::immediate(2))
            .await
            .unwrap();
        assert_eq!(username.as_deref(), Some("carol"));
    }

    #[tokio::test]
    async fn test_multiple_matches_takes_first() {
        let mut service = MockIdentityService::new();
        service
            .expect_search_users_by_email()
            .with(eq("dave@example.com"))
            .returning(|_| Ok(found(&["dave", "dave2"])));

        let username = resolve_email(&service, "dave@example.com", &RateLimitPolicy::immediate(2))
            .await
            .unwrap();
        assert_eq!(username.as_deref(), Some("dave"));
    }

    #[tokio::test]
    async fn test_no_match() {
        let mut service = MockIdentityService::new();
        service
            .expect_search_users_by_email()
            .returning(|_| Ok(UserSearchResults::default()));

        let username = resolve_email(&service, "ghost@example.com", &RateLimitPolicy::immediate(2))
            .await
            .unwrap();
        assert_eq!(username, None);
    }

    #[tokio::test]
    async fn test_resolve_contributors_only_looks_up_unknown_emails() {
        let mut service = MockIdentityService::new();
        service
            .expect_search_users_by_email()
            .with(eq("new@example.com"))
            .times(1)
            .returning(|_| Ok(found(&["Newbie"])));

        let mut table = ContributorTable::new();
        table.add("alice", "a@x.com");

        let emails: ContributorEmails = [
            "a@x.com",
            "new@example.com",
            "7+bob@users.noreply.github.com",
        ]
        .into_iter()
        .collect();

        let usernames = resolve_contributors(&service, &mut table, &emails, &RateLimitPolicy::immediate(2))
            .await
            .unwrap();

        assert_eq!(usernames, vec!["alice", "bob", "Newbie"]);
        assert!(table.is_resolved("new@example.com"));
        assert!(table.is_resolved("7+bob@users.noreply.github.com"));
    }

    #[test]
    fn test_credited_usernames_unique_when_case_differs() {
        let mut table = ContributorTable::new();
        table.add("alice", "a@x.com");
        table.add("Alice", "b@x.com");
        table.add("alice", "c@x.com");
        table.add("bob", "d@x.com");

        let emails: ContributorEmails = ["a@x.com", "b@x.com", "c@x.com", "d@x.com"]
            .into_iter()
            .collect();
        let usernames = credited_usernames(&table, &emails);

        assert_eq!(usernames.iter().filter(|u| *u == "alice").count(), 1);
        assert_eq!(usernames, vec!["Alice", "alice", "bob"]);
    }

    #[test]
    fn test_offline_credits_noreply_and_cached_only() {
        let mut table = ContributorTable::new();
        table.add("alice", "a@x.com");

        let emails: ContributorEmails = [
            "a@x.com",
            "unknown@example.com",
            "42+carol@users.noreply.github.com",
        ]
        .into_iter()
        .collect();
        let usernames = resolve_offline(&mut table, &emails);

        assert_eq!(usernames, vec!["alice", "carol"]);
        assert!(table.is_resolved("42+carol@users.noreply.github.com"));
        assert!(!table.is_resolved("unknown@example.com"));
    }

    #[tokio::test]
    async fn test_social_handles_skip_failures() {
        let mut service = MockIdentityService::new();
        service
            .expect_user_profile()
            .with(eq("alice"))
            .returning(|_| {
                Ok(UserProfile {
                    login: "alice".to_string(),
                    twitter_username: Some("alice_tw".to_string()),
                })
            });
        service
            .expect_user_profile()
            .with(eq("bob"))
            .returning(|_| Err(GitHubError::RateLimited));

        let handles =
            fetch_social_handles(&service, &["alice".to_string(), "bob".to_string()]).await;

        assert_eq!(handles.len(), 1);
        assert_eq!(handles.get("alice"), Some(&Some("alice_tw".to_string())));
    }
}
