//! Project configuration.
//!
//! Defaults describe the ActivityWatch bundle repository; the CLI can
//! override the GitHub organisation.

/// Submodules listed first in the changelog, in this order.
const REPO_ORDER: &[&str] = &[
    "activitywatch",
    "aw-server",
    "aw-server-rust",
    "aw-webui",
    "aw-watcher-afk",
    "aw-watcher-window",
    "aw-qt",
    "aw-core",
    "aw-client",
];

/// Contributors whose emails don't resolve through the user search.
const CONTRIBUTOR_OVERRIDES: &[(&str, &[&str])] = &[
    ("erikbjare", &["erik.bjareholt@gmail.com", "erik@bjareho.lt"]),
    ("iloveitaly", &["iloveitaly@gmail.com"]),
    ("kewde", &["kewde@particl.io"]),
    ("victorwinberg", &["victor.m.winberg@gmail.com"]),
    ("NicoWeio", &["nico.weio@gmail.com"]),
];

/// Describes the project a changelog is built for.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// GitHub organisation hosting every repository.
    pub org: String,
    /// Display name used in prose.
    pub name: String,
    /// Bundle repository name, also the prefix of release assets.
    pub slug: String,
    pub website: String,
    pub getting_started_url: String,
    /// Default branch the release range ends at.
    pub branch: String,
    pub repo_order: Vec<String>,
    pub contributor_overrides: Vec<(String, Vec<String>)>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            org: "ActivityWatch".to_string(),
            name: "ActivityWatch".to_string(),
            slug: "activitywatch".to_string(),
            website: "https://activitywatch.net".to_string(),
            getting_started_url: "https://docs.activitywatch.net/en/latest/getting-started.html"
                .to_string(),
            branch: "master".to_string(),
            repo_order: REPO_ORDER.iter().map(|s| s.to_string()).collect(),
            contributor_overrides: CONTRIBUTOR_OVERRIDES
                .iter()
                .map(|(user, emails)| {
                    (user.to_string(), emails.iter().map(|e| e.to_string()).collect())
                })
                .collect(),
        }
    }
}

impl ProjectConfig {
    pub fn readme_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/blob/{}/README.md",
            self.org, self.slug, self.branch
        )
    }

    pub fn release_download_base(&self, tag: &str) -> String {
        format!(
            "https://github.com/{}/{}/releases/download/{}",
            self.org, self.slug, tag
        )
    }
}
