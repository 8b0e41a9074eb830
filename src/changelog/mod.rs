//! Changelog rendering and writing.

pub mod dedupe;
pub mod document;
pub mod format;
pub mod links;
pub mod writer;

pub use dedupe::{remove_duplicate_blocks, remove_duplicates};
pub use document::ReleaseDocument;
pub use format::{render_section, wrap_details, SectionFormat};
pub use links::Linker;
pub use writer::write_changelog;
