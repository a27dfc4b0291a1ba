//! Database seeding command.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use folio_archive::SiteArchive;
use folio_store::{seed, ContentStore, MemoryStore, MongoStore, Page, SeedMode, SeedReport};

use crate::config::{Backend, ConfigFile};

/// Connect to the configured MongoDB deployment.
pub async fn connect(config: &ConfigFile) -> Result<MongoStore> {
    MongoStore::connect(&config.mongo_config())
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.name))
}

/// Open the content store selected in `[database]`.
pub async fn open_store(config: &ConfigFile) -> Result<Arc<dyn ContentStore>> {
    match config.database.backend {
        Backend::Mongodb => Ok(Arc::new(connect(config).await?)),
        Backend::Memory => {
            tracing::info!("Using in-memory content store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Read the page records from the site archive and seed `store` with them.
pub async fn seed_from_archive(
    config: &ConfigFile,
    store: &dyn ContentStore,
    mode: SeedMode,
) -> Result<SeedReport> {
    let archive_path = config.archive_path();
    let mut archive = SiteArchive::open(&archive_path)?;

    let pages: Vec<Page> = archive.read_json(&config.site.data_entry)?;
    tracing::info!(
        "Read {} pages from {}",
        pages.len(),
        archive_path.display()
    );

    let report = seed(store, pages, mode)
        .await
        .context("Failed to seed content store")?;

    Ok(report)
}

/// Run the seed command.
pub async fn run(config: ConfigFile, reseed: bool) -> Result<()> {
    if config.database.backend == Backend::Memory {
        bail!("The in-memory backend is seeded by `folio serve` on every start");
    }

    let store = connect(&config).await?;

    let mode = if reseed {
        SeedMode::Replace
    } else {
        SeedMode::IfEmpty
    };

    let report = seed_from_archive(&config, &store, mode).await?;

    if report.skipped {
        tracing::info!("Database already seeded. Use --reseed to replace its content.");
    }

    Ok(())
}
