pub mod ingest;
pub mod log;
pub mod rpc;

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

pub use ingest::IngestConfig;
pub use log::LoggingConfig;
pub use rpc::RpcConfig;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

pub async fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let config_str = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
