//! Release document assembly.

use crate::config::ProjectConfig;

/// Everything that goes into a release changelog.
#[derive(Debug, Clone)]
pub struct ReleaseDocument<'a> {
    pub project: &'a ProjectConfig,
    /// Release tag, the new side of the range.
    pub tag: &'a str,
    /// Previous release, the old side of the range.
    pub since: &'a str,
    /// Usernames to credit, already sorted.
    pub contributors: &'a [String],
    /// Rendered repository sections.
    pub changes: &'a str,
}

impl ReleaseDocument<'_> {
    fn header(&self) -> String {
        let p = self.project;
        format!(
            "# {tag}\n\n\
             These are the release notes for {name} version {tag}.\n\n\
             **New to {name}?** Check out the [website]({website}) and the [README]({readme}).",
            tag = self.tag,
            name = p.name,
            website = p.website,
            readme = p.readme_url(),
        )
    }

    fn installation(&self) -> String {
        format!(
            "# Installation\n\nSee the [getting started guide in the documentation]({}).",
            self.project.getting_started_url
        )
    }

    fn downloads(&self) -> String {
        let base = self.project.release_download_base(self.tag);
        let slug = &self.project.slug;
        let tag = self.tag;
        format!(
            "# Downloads\n\n \
             - [**Windows**]({base}/{slug}-{tag}-windows-x86_64-setup.exe) (.exe, installer)\n \
             - [**macOS**]({base}/{slug}-{tag}-macos-x86_64.dmg) (.dmg)\n \
             - [**Linux**]({base}/{slug}-{tag}-linux-x86_64.zip) (.zip)"
        )
    }

    fn contributors_section(&self) -> String {
        let credits: Vec<String> = self.contributors.iter().map(|u| format!("@{}", u)).collect();
        format!(
            "# Contributors\n\nThanks to everyone who contributed to this release:\n\n{}",
            credits.join(", ")
        )
    }

    fn changelog(&self) -> String {
        format!(
            "# Changelog\n\nChanges since {}\n\n{}",
            self.since,
            self.changes.trim()
        )
    }

    /// Render the full markdown document.
    pub fn render(&self) -> String {
        let sections = [
            self.header(),
            self.installation(),
            self.downloads(),
            self.contributors_section(),
            self.changelog(),
        ];

        let mut out = String::new();
        for section in sections {
            out.push_str(section.trim());
            out.push_str("\n\n");
        }
        out
    }
}
