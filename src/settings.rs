use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_BIND_ADDRESS: &str = "localhost:8000";
const DEFAULT_NEWS_JSON_PATH: &str = "news.json";

/// Server settings, layered: built-in defaults, then an optional
/// `HyperNews.{toml,json,yaml,...}` in the working directory, then
/// `HYPERNEWS_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub news_json_path: PathBuf,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::layered(File::with_name("HyperNews").required(false))
    }

    /// Reads settings from an explicit file instead of the default name.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::layered(File::from(path))
    }

    fn layered<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("news_json_path", DEFAULT_NEWS_JSON_PATH)?
            .add_source(file)
            .add_source(Environment::with_prefix("HYPERNEWS"))
            .build()?
            .try_deserialize()
    }
}
