//! Site server command.

use anyhow::Result;
use folio_server::SiteServer;
use folio_store::SeedMode;

use super::{extract, seed};
use crate::config::{Backend, ConfigFile};

/// Command line options of `folio serve`.
#[derive(Debug, Default)]
pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub open: bool,
    pub watch: bool,
    /// `None` skips seeding
    pub seed: Option<SeedMode>,
}

/// Run the serve command.
///
/// Seeds the content store, extracts the site archive and serves until the
/// process ends. The in-memory backend is always seeded.
pub async fn run(config: ConfigFile, options: ServeOptions) -> Result<()> {
    let store = seed::open_store(&config).await?;

    let mode = match config.database.backend {
        Backend::Memory => Some(options.seed.unwrap_or_default()),
        Backend::Mongodb => options.seed,
    };
    if let Some(mode) = mode {
        seed::seed_from_archive(&config, store.as_ref(), mode).await?;
    }

    extract::extract(&config, &config.paths.temporary)?;

    let mut server_config = config.server_config();
    if let Some(host) = options.host {
        server_config.host = host;
    }
    if let Some(port) = options.port {
        server_config.port = port;
    }
    server_config.open |= options.open;
    server_config.watch = options.watch;

    SiteServer::new(server_config, store).start().await?;

    Ok(())
}
