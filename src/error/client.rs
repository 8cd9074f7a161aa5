use thiserror::Error;

/// Errors surfaced by the ledger query client. The ingestor maps
/// `Transport` to its network failure mode and everything else to the
/// unknown-fetch bucket; no retries happen at this layer.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Failed to decode rpc payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Malformed rpc envelope: missing both result and error")]
    MalformedEnvelope,
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
