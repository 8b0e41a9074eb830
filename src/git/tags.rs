//! Tag discovery for the default commit range.

use std::path::Path;

use git2::{DescribeFormatOptions, DescribeOptions, Repository};
use tracing::debug;

use crate::error::GitError;

use super::range::CommitRange;

/// Name of the most recent tag reachable from HEAD.
///
/// Same result as `git describe --tags --abbrev=0`; lightweight tags count.
pub fn get_latest_tag(repo: &Repository) -> Result<String, GitError> {
    let mut opts = DescribeOptions::new();
    opts.describe_tags();

    let describe = repo.describe(&opts).map_err(GitError::NoTag)?;

    let mut format = DescribeFormatOptions::new();
    format.abbreviated_size(0);

    let tag = describe.format(Some(&format)).map_err(GitError::NoTag)?;
    debug!(%tag, "Found latest tag");
    Ok(tag)
}

/// Default range: latest tag up to `branch`.
pub fn default_range(path: &Path, branch: &str) -> Result<CommitRange, GitError> {
    let repo = Repository::open(path).map_err(GitError::OpenRepository)?;
    let tag = get_latest_tag(&repo)?;
    Ok(CommitRange::new(tag, branch))
}
