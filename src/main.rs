//! bundlelog - CLI entry point.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bundlelog::changelog::{
    dedupe::DEFAULT_MIN_LEN, format::DEFAULT_WRAP_LINES, remove_duplicate_blocks, render_section,
    write_changelog,
};
use bundlelog::contributors::{
    fetch_social_handles, resolve_contributors, resolve_offline, DEFAULT_CACHE_PATH,
};
use bundlelog::git::{check_git_installed, default_range};
use bundlelog::github::{get_github_token, GitHubIdentity, RateLimitPolicy};
use bundlelog::summary::DEFAULT_FILTER_TYPES;
use bundlelog::{
    CommitRange, ContributorTable, GitCli, Linker, ProjectConfig, ReleaseDocument, SectionFormat,
    Summarizer, SummaryOptions,
};

/// Generate a release changelog for a repository and its submodules.
#[derive(Parser, Debug)]
#[command(name = "bundlelog")]
#[command(about = "Generate a release changelog for a repository and its submodules")]
#[command(version)]
struct Cli {
    /// Git commit range as <old>...<new> (defaults to latest tag...<branch>)
    #[arg(long)]
    range: Option<String>,

    /// Path to the git repository
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Path to the output changelog
    #[arg(short = 'o', long, default_value = "changelog.md")]
    output: PathBuf,

    /// Branch the default range ends at
    #[arg(long, default_value = "master")]
    branch: String,

    /// GitHub organisation hosting the repositories
    #[arg(long, default_value = "ActivityWatch")]
    org: String,

    /// Contributor cache file (username and emails, tab-separated)
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    contributors_cache: PathBuf,

    /// Commit types left out of the misc section
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_FILTER_TYPES.map(String::from))]
    filter_types: Vec<String>,

    /// Collapse fixes and misc sections longer than this many lines
    #[arg(long, default_value_t = DEFAULT_WRAP_LINES)]
    wrap_lines: usize,

    /// Try to remove submodule sections that appear twice (best-effort)
    #[arg(long)]
    remove_duplicates: bool,

    /// Minimum number of lines for a block to count as a duplicate
    #[arg(long, default_value_t = DEFAULT_MIN_LEN)]
    min_duplicate_len: usize,

    /// Skip GitHub lookups; credit cached contributors and no-reply addresses
    #[arg(long)]
    offline: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let project = ProjectConfig {
        org: cli.org.clone(),
        branch: cli.branch.clone(),
        ..ProjectConfig::default()
    };

    // Step 1: Check prerequisites
    check_git_installed().context("git is required")?;

    // Step 2: Resolve commit range
    let range = match &cli.range {
        Some(range) => CommitRange::parse(range)?,
        None => default_range(&cli.path, &project.branch)
            .context("Failed to determine the default commit range")?,
    };
    let since = range.old().unwrap_or("the beginning").to_string();
    let tag = range.new_ref().unwrap_or(&project.branch).to_string();

    // Step 3: Summarize commits, recursing into submodules.
    // Contributor emails are complete only once this returns.
    info!("Generating commit summary");
    let options = SummaryOptions {
        filter_types: cli.filter_types.iter().cloned().collect::<BTreeSet<_>>(),
        repo_order: project.repo_order.clone(),
    };
    let summary = Summarizer::new(&GitCli, &options)
        .summarize(&cli.path, &range)
        .context("Failed to summarize commits")?;

    let format = SectionFormat {
        linker: Linker::new(&project.org),
        wrap_lines: cli.wrap_lines,
        bundle_repo: Some(project.slug.clone()),
    };
    let mut changes = render_section(summary.section.as_ref(), &format);
    if cli.remove_duplicates {
        changes = remove_duplicate_blocks(&changes, cli.min_duplicate_len);
    }

    // Step 4: Resolve contributors
    let mut table = ContributorTable::with_overrides(&project.contributor_overrides);
    table
        .load(&cli.contributors_cache)
        .context("Failed to read contributor cache")?;

    let usernames = if cli.offline {
        resolve_offline(&mut table, &summary.contributors)
    } else {
        let identity = GitHubIdentity::new(get_github_token())?;
        let usernames = resolve_contributors(
            &identity,
            &mut table,
            &summary.contributors,
            &RateLimitPolicy::from_env(),
        )
        .await
        .context("Failed to resolve contributors")?;

        table
            .save(&cli.contributors_cache)
            .context("Failed to write contributor cache")?;

        let handles = fetch_social_handles(&identity, &usernames).await;
        let mentions: Vec<String> = handles
            .values()
            .flatten()
            .map(|handle| format!("@{}", handle))
            .collect();
        println!("{}", mentions.join(", "));

        usernames
    };

    // Step 5: Assemble and write
    info!("Building final output");
    let document = ReleaseDocument {
        project: &project,
        tag: &tag,
        since: &since,
        contributors: &usernames,
        changes: &changes,
    }
    .render();

    let lines = write_changelog(&cli.output, &document).context("Failed to write changelog")?;
    println!("Wrote {} lines to {}", lines, cli.output.display());

    Ok(())
}
