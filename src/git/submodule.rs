//! Parsing of `git submodule summary` output.

use tracing::{debug, warn};

use super::range::CommitRange;

/// One submodule whose pointer moved within the summarized range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleChange {
    pub name: String,
    pub range: CommitRange,
    pub count: Option<usize>,
}

/// Parse `git submodule summary` output into submodule changes.
///
/// Entries are blank-line separated blocks whose first line reads
/// `* <path> <old>...<new> (<count>):`. Blocks for removed submodules,
/// short headers and unparseable ranges are skipped.
pub fn parse_submodule_summary(output: &str) -> Vec<SubmoduleChange> {
    let mut changes = Vec::new();

    for block in output.split("\n\n") {
        let header = block.lines().next().unwrap_or("");

        if header.starts_with("fatal: not a git repository") {
            debug!(header, "Skipping removed submodule");
            continue;
        }
        if header.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() < 4 {
            debug!(header, "Skipping submodule entry, submodule may have been deleted");
            continue;
        }

        let name = fields[1].trim_matches('.').trim_matches('/').to_string();
        let range = match CommitRange::parse(fields[2]) {
            Ok(range) => range,
            Err(e) => {
                warn!(header, error = %e, "Skipping submodule entry with unparseable range");
                continue;
            }
        };
        let count = fields[3]
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(':')
            .trim_end_matches(')')
            .parse::<usize>()
            .ok();

        changes.push(SubmoduleChange { name, range, count });
    }

    changes
}
