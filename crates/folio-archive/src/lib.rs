//! Site archive access.
//!
//! A site ships as a single zip holding the seed data (`data/pages.json`)
//! next to the assets pages refer to. The archive is read once at startup:
//! the JSON feeds the content store and the whole tree is extracted to a
//! directory that the server exposes under `/temporary`.

pub mod archive;

pub use archive::{ArchiveError, ExtractSummary, SiteArchive, DEFAULT_DATA_ENTRY};
