//! Initialize a folio site in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_server::{write_default_assets, write_default_templates};

use crate::config::{ConfigFile, DEFAULT_CONFIG};

/// Run the init command.
pub async fn run(config_path: &Path, config: &ConfigFile, yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    let templates = write_default_templates(&config.paths.templates, yes)
        .context("Failed to write templates")?;
    tracing::info!(
        "Wrote {} templates to {}",
        templates,
        config.paths.templates.display()
    );

    let assets = write_default_assets(&config.paths.static_dir, yes)
        .context("Failed to write static assets")?;
    tracing::info!(
        "Wrote {} static files to {}",
        assets,
        config.paths.static_dir.display()
    );

    fs::create_dir_all(&config.paths.files).context("Failed to create files directory")?;

    tracing::info!("Initialization complete!");
    tracing::info!(
        "Place your site archive at {} and run 'folio serve'.",
        config.archive_path().display()
    );

    Ok(())
}
