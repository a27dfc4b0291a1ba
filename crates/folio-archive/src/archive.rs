//! Zip backed site archive.

use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::Path;

use serde::de::DeserializeOwned;
use zip::result::ZipError;
use zip::ZipArchive;

/// Archive entry holding the page records.
pub const DEFAULT_DATA_ENTRY: &str = "data/pages.json";

/// Errors that can occur while reading a site archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Failed to open archive {path}: {message}")]
    OpenError { path: String, message: String },

    #[error("Archive has no entry {0}")]
    MissingEntry(String),

    #[error("Failed to parse {entry}: {message}")]
    JsonError { entry: String, message: String },

    #[error("Refusing to extract entry outside the target directory: {0}")]
    UnsafePath(String),

    #[error("Failed to read archive: {0}")]
    ReadError(String),

    #[error("Failed to write {path}: {message}")]
    WriteError { path: String, message: String },
}

impl From<ZipError> for ArchiveError {
    fn from(e: ZipError) -> Self {
        ArchiveError::ReadError(e.to_string())
    }
}

/// Counts of what [`SiteArchive::extract_to`] created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Files written
    pub files: usize,

    /// Directory entries created
    pub directories: usize,
}

/// A site archive over any seekable reader.
#[derive(Debug)]
pub struct SiteArchive<R = File> {
    archive: ZipArchive<R>,
    source: String,
}

impl SiteArchive<File> {
    /// Open the archive at `path`.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let open_error = |message: String| ArchiveError::OpenError {
            path: path.display().to_string(),
            message,
        };

        let file = File::open(path).map_err(|e| open_error(e.to_string()))?;
        let archive = ZipArchive::new(file).map_err(|e| open_error(e.to_string()))?;

        Ok(Self {
            archive,
            source: path.display().to_string(),
        })
    }
}

impl<R: Read + Seek> SiteArchive<R> {
    /// Wrap an already opened reader.
    pub fn new(reader: R) -> Result<Self, ArchiveError> {
        let archive = ZipArchive::new(reader).map_err(|e| ArchiveError::OpenError {
            path: "<reader>".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            archive,
            source: "<reader>".to_string(),
        })
    }

    /// Number of entries, directories included.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Deserialize a JSON entry.
    pub fn read_json<T: DeserializeOwned>(&mut self, entry: &str) -> Result<T, ArchiveError> {
        let file = self.archive.by_name(entry).map_err(|e| match e {
            ZipError::FileNotFound => ArchiveError::MissingEntry(entry.to_string()),
            other => ArchiveError::from(other),
        })?;

        let value = serde_json::from_reader(file).map_err(|e| ArchiveError::JsonError {
            entry: entry.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("Read {} from {}", entry, self.source);

        Ok(value)
    }

    /// Extract every entry below `dir`, creating it if needed.
    ///
    /// Existing files are overwritten.
    pub fn extract_to(&mut self, dir: &Path) -> Result<ExtractSummary, ArchiveError> {
        create_dir(dir)?;

        let mut summary = ExtractSummary::default();

        for index in 0..self.archive.len() {
            let mut entry = self.archive.by_index(index)?;

            let relative = entry
                .enclosed_name()
                .ok_or_else(|| ArchiveError::UnsafePath(entry.name().to_string()))?;
            let target = dir.join(relative);

            if entry.is_dir() {
                create_dir(&target)?;
                summary.directories += 1;
                continue;
            }

            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }

            let write_error = |e: io::Error| ArchiveError::WriteError {
                path: target.display().to_string(),
                message: e.to_string(),
            };

            let mut out = File::create(&target).map_err(write_error)?;
            io::copy(&mut entry, &mut out).map_err(write_error)?;

            tracing::debug!("Extracted {}", target.display());
            summary.files += 1;
        }

        tracing::info!(
            "Extracted {} files from {} to {}",
            summary.files,
            self.source,
            dir.display()
        );

        Ok(summary)
    }
}

fn create_dir(dir: &Path) -> Result<(), ArchiveError> {
    fs::create_dir_all(dir).map_err(|e| ArchiveError::WriteError {
        path: dir.display().to_string(),
        message: e.to_string(),
    })
}
