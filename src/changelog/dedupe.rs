//! Best-effort removal of duplicated blocks.
//!
//! A submodule shared by two parents (e.g. a web UI vendored by two servers)
//! shows up twice in the changelog. This heuristic drops the longest run of
//! lines that were already emitted earlier. It is unreliable: it can miss the
//! duplicate, or keep part of it. Review the output by hand.

use std::collections::HashSet;

use tracing::info;

/// Minimum run length removed by default.
pub const DEFAULT_MIN_LEN: usize = 10;

/// Remove runs of at least `minlen` lines that repeat earlier lines, preserving order.
///
/// The repeated lines do not have to be adjacent in the input. With
/// `only_sections`, a run may only start at a `#` header line.
pub fn remove_duplicates<'a>(lines: &[&'a str], minlen: usize, only_sections: bool) -> Vec<&'a str> {
    if lines.len() < minlen {
        return lines.to_vec();
    }

    let mut out: Vec<&'a str> = Vec::with_capacity(lines.len());
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut run: Vec<&'a str> = Vec::new();

    let flush = |run: &mut Vec<&'a str>, out: &mut Vec<&'a str>, seen: &mut HashSet<&'a str>| {
        if run.len() < minlen {
            seen.extend(run.iter().copied());
            out.append(run);
        } else {
            let duplicate = run.join("\n");
            let preview: String = duplicate.chars().take(80).collect();
            info!("Removing duplicate '{}...'", preview);
            run.clear();
        }
    };

    for (i, &line) in lines.iter().enumerate() {
        if i == 0 || !seen.contains(line) {
            flush(&mut run, &mut out, &mut seen);
            seen.insert(line);
            out.push(line);
        } else if only_sections && run.is_empty() && !line.starts_with('#') {
            out.push(line);
        } else {
            run.push(line);
        }
    }
    flush(&mut run, &mut out, &mut seen);

    out
}

/// Apply [`remove_duplicates`] to a whole document.
pub fn remove_duplicate_blocks(text: &str, minlen: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    remove_duplicates(&lines, minlen, true).join("\n")
}
