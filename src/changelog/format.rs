//! Markdown rendering of repository sections.

use tracing::debug;

use crate::summary::RepoSection;

use super::links::Linker;

/// Bodies with more lines than this are collapsed by default.
pub const DEFAULT_WRAP_LINES: usize = 5;

/// Section rendering options.
#[derive(Debug, Clone)]
pub struct SectionFormat {
    pub linker: Linker,
    pub wrap_lines: usize,
    /// Repository whose title gets a "(bundle repo)" suffix.
    pub bundle_repo: Option<String>,
}

impl SectionFormat {
    pub fn new(linker: Linker) -> Self {
        Self {
            linker,
            wrap_lines: DEFAULT_WRAP_LINES,
            bundle_repo: None,
        }
    }
}

/// Wrap `body` in a `<details>` element if it is longer than `wrap_lines` lines.
pub fn wrap_details(title: &str, body: &str, wrap_lines: usize) -> String {
    let collapse = body.matches('\n').count() > wrap_lines;

    let mut out = format!("\n\n### {}", title);
    if collapse {
        out.push_str("\n<details><summary>Click to expand</summary>");
    }
    out.push_str(&format!("\n<p>\n\n{}\n\n</p>\n", body.trim_end()));
    if collapse {
        out.push_str("</details>");
    }
    out
}

/// Render a section and its subsections. `None` (a removed submodule) renders empty.
pub fn render_section(section: Option<&RepoSection>, format: &SectionFormat) -> String {
    section.map(|s| render_repo(s, format)).unwrap_or_default()
}

fn render_repo(section: &RepoSection, format: &SectionFormat) -> String {
    let title = match &format.bundle_repo {
        Some(bundle) if *bundle == section.name => format!("{} (bundle repo)", section.name),
        _ => section.name.clone(),
    };
    let mut out = format!("\n## 📦 {}", title);

    let buckets = [
        ("✨ Features", &section.features, false),
        ("🐛 Fixes", &section.fixes, true),
        ("🔨 Misc", &section.misc, true),
    ];

    for (name, commits, collapsible) in buckets {
        if commits.is_empty() {
            continue;
        }

        let entries: String = commits
            .iter()
            .map(|c| format!("\n - {}", format.linker.format_commit(c)))
            .collect();
        let title = format!("{} ({})", name, commits.len());

        if collapsible {
            out.push_str(&wrap_details(&title, &entries, format.wrap_lines));
        } else {
            out.push_str(&format!("\n\n### {}", title));
            out.push_str(&entries);
        }
    }

    for sub in &section.subsections {
        let rendered = render_repo(sub, format);
        debug!(name = %sub.name, length = rendered.len(), "Rendered submodule section");
        out.push('\n');
        out.push_str(&rendered);
    }

    out
}
