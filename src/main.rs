use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use playit_catalog_server::catalog::prepare_catalog;
use playit_catalog_server::catalog_store::{
    CatalogStore, SqliteCatalogStore, DEFAULT_READ_POOL_SIZE,
};
use playit_catalog_server::config;
use playit_catalog_server::server::{run_server, RequestsLoggingLevel, ServerConfig};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in it override the CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite catalog database file.
    #[clap(long, default_value = "playit.db")]
    pub db_path: PathBuf,

    /// Path to the YAML catalog document loaded at startup.
    #[clap(long, default_value = "assets/yaml/playit.yaml")]
    pub source: PathBuf,

    /// Directory served under /assets, containing html/playit.html.
    #[clap(long, default_value = "assets")]
    pub assets_dir: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 9877)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Skip loading the catalog document when the database already has data.
    #[clap(long)]
    pub no_reload: bool,

    /// Load the catalog, print the entity counts and exit without serving.
    #[clap(long)]
    pub check_only: bool,
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            db_path: args.db_path.clone(),
            source_path: args.source.clone(),
            assets_dir: args.assets_dir.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            reload_catalog: !args.no_reload,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  db_path: {:?}", app_config.db_path);
    info!("  source_path: {:?}", app_config.source_path);
    info!("  assets_dir: {:?}", app_config.assets_dir);
    info!("  port: {}", app_config.port);

    if !app_config.db_path.exists() {
        info!("Creating new catalog database at {:?}", app_config.db_path);
    }
    let catalog_store = SqliteCatalogStore::new(&app_config.db_path, DEFAULT_READ_POOL_SIZE)?;

    prepare_catalog(
        &catalog_store,
        &app_config.source_path,
        app_config.reload_catalog,
    )?;

    if cli_args.check_only {
        println!("artists: {}", catalog_store.get_artists_count());
        println!("albums: {}", catalog_store.get_albums_count());
        println!("tracks: {}", catalog_store.get_tracks_count());
        return Ok(());
    }

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level,
        port: app_config.port,
        assets_dir: app_config.assets_dir,
    };

    if let Err(err) = run_server(Arc::new(catalog_store), server_config).await {
        error!("Server stopped: {:#}", err);
        std::process::exit(1);
    }

    Ok(())
}
