//! Archive extraction command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use folio_archive::{ExtractSummary, SiteArchive};

use crate::config::ConfigFile;

/// Extract the site archive into `output`.
pub fn extract(config: &ConfigFile, output: &Path) -> Result<ExtractSummary> {
    let mut archive = SiteArchive::open(&config.archive_path())?;
    let summary = archive.extract_to(output)?;
    Ok(summary)
}

/// Run the extract command.
pub async fn run(config: ConfigFile, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| config.paths.temporary.clone());

    let summary = extract(&config, &output)?;

    tracing::info!(
        "Created {} files and {} directories in {}",
        summary.files,
        summary.directories,
        output.display()
    );

    Ok(())
}
