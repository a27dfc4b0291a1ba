//! folio CLI - portfolio site server backed by MongoDB.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use folio_store::SeedMode;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use commands::serve::ServeOptions;
use config::Overrides;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio site server backed by MongoDB")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to folio.toml config file
    #[arg(short, long, default_value = "folio.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    dirs: DirArgs,
}

/// Directory and database overrides shared by all commands.
#[derive(Args)]
struct DirArgs {
    /// Directory holding the site archive
    #[arg(long = "files-dir", visible_alias = "fls", global = true)]
    files_dir: Option<PathBuf>,

    /// Directory served under /static
    #[arg(long = "static-dir", visible_alias = "stc", global = true)]
    static_dir: Option<PathBuf>,

    /// Directory holding the page templates
    #[arg(long = "templates-dir", visible_alias = "tmp", global = true)]
    templates_dir: Option<PathBuf>,

    /// Directory the archive is extracted to
    #[arg(long = "temporary-dir", visible_alias = "tpr", global = true)]
    temporary_dir: Option<PathBuf>,

    /// MongoDB connection string
    #[arg(long, global = true)]
    database_uri: Option<String>,
}

impl From<DirArgs> for Overrides {
    fn from(args: DirArgs) -> Self {
        Self {
            files_dir: args.files_dir,
            static_dir: args.static_dir,
            templates_dir: args.templates_dir,
            temporary_dir: args.temporary_dir,
            database_uri: args.database_uri,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config, templates and static assets
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Seed the database, extract the archive and serve the site
    Serve {
        /// Port to listen on (defaults to config or 9090)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Open browser
        #[arg(long)]
        open: bool,

        /// Reload templates when they change
        #[arg(short, long)]
        watch: bool,

        /// Replace existing database content
        #[arg(long)]
        reseed: bool,

        /// Do not touch the database content
        #[arg(long, conflicts_with = "reseed")]
        skip_seed: bool,

        /// Keep content in memory instead of MongoDB
        #[arg(long)]
        in_memory: bool,
    },

    /// Seed the database from the site archive
    Seed {
        /// Replace existing database content
        #[arg(long)]
        reseed: bool,
    },

    /// Extract the site archive
    Extract {
        /// Output directory (defaults to the temporary directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let mut config = config::load_config(&cli.config)?;
    config.apply(cli.dirs.into());

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, &config, yes).await?;
        }
        Commands::Serve {
            port,
            host,
            open,
            watch,
            reseed,
            skip_seed,
            in_memory,
        } => {
            if in_memory {
                config.database.backend = config::Backend::Memory;
            }
            let seed = match (skip_seed, reseed) {
                (true, _) => None,
                (false, true) => Some(SeedMode::Replace),
                (false, false) => Some(SeedMode::IfEmpty),
            };
            let options = ServeOptions {
                host,
                port,
                open,
                watch,
                seed,
            };
            commands::serve::run(config, options).await?;
        }
        Commands::Seed { reseed } => {
            commands::seed::run(config, reseed).await?;
        }
        Commands::Extract { output } => {
            commands::extract::run(config, output).await?;
        }
    }

    Ok(())
}
