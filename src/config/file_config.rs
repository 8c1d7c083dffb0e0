use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration. Every value present here wins over the
/// matching command line argument.
///
/// ```toml
/// db_path = "/var/lib/playit/playit.db"
/// source_path = "/etc/playit/playit.yaml"
/// assets_dir = "/srv/playit/assets"
/// port = 9877
/// logging_level = "headers"
/// reload_catalog = false
/// ```
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub db_path: Option<String>,
    pub source_path: Option<String>,
    pub assets_dir: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub reload_catalog: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
