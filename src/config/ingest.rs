use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_TX_QUERY_LIMIT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Page bound per directional query; longer histories are truncated.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_TX_QUERY_LIMIT
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { page_size: default_page_size() }
    }
}
