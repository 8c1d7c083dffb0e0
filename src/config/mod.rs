mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that take part in config resolution.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub source_path: PathBuf,
    pub assets_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub reload_catalog: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub source_path: PathBuf,
    pub assets_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub reload_catalog: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.db_path.clone());
        if db_path.as_os_str().is_empty() {
            bail!("db_path must not be empty");
        }
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let source_path = file
            .source_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.source_path.clone());
        let assets_dir = file
            .assets_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.assets_dir.clone());

        let port = file.port.unwrap_or(cli.port);

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Invalid logging_level in config file: {:?}", s),
            },
            None => cli.logging_level.clone(),
        };

        let reload_catalog = file.reload_catalog.unwrap_or(cli.reload_catalog);

        Ok(AppConfig {
            db_path,
            source_path,
            assets_dir,
            port,
            logging_level,
            reload_catalog,
        })
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
