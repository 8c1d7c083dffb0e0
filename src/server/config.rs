use super::RequestsLoggingLevel;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Served under `/assets`; the page shell is `html/playit.html` in it.
    pub assets_dir: PathBuf,
}

impl ServerConfig {
    pub fn shell_page_path(&self) -> PathBuf {
        self.assets_dir.join("html").join("playit.html")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 9877,
            assets_dir: PathBuf::from("assets"),
        }
    }
}
