use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Fullnode JSON-RPC endpoint.
    pub url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    15_000
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://fullnode.mainnet.sui.io:443".to_string(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
