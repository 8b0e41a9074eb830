//! GitHub token detection.
//!
//! A token is optional: user lookups work anonymously, just with a much
//! lower rate limit. Lookup order:
//! 1. `gh auth token` (gh CLI)
//! 2. GITHUB_TOKEN env var
//! 3. GH_TOKEN env var

use std::env;
use std::process::Command;

use tracing::debug;

/// Find a GitHub token, if one is configured.
pub fn get_github_token() -> Option<String> {
    get_token_from_gh_cli().or_else(get_token_from_env)
}

/// Token from GITHUB_TOKEN, falling back to GH_TOKEN. Empty values are ignored.
pub fn get_token_from_env() -> Option<String> {
    ["GITHUB_TOKEN", "GH_TOKEN"].into_iter().find_map(|var| {
        env::var(var).ok().filter(|token| !token.is_empty()).inspect(|_| {
            debug!(var, "Using GitHub token from environment");
        })
    })
}

/// Try to get a token from the gh CLI.
fn get_token_from_gh_cli() -> Option<String> {
    which::which("gh").ok()?;

    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return None;
    }
    debug!("Using GitHub token from gh CLI");
    Some(token)
}
