use thiserror::Error;

/// Failure taxonomy of the ingestion path. `EmptyResult` is not here: a
/// valid address with zero transactions is a session state, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Local validation failure; no I/O was attempted.
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),
    /// The transport layer failed during either directional query.
    #[error("Network error while querying ledger: {0}")]
    Network(String),
    /// Any other ingestion failure.
    #[error("Unknown fetch error: {0}")]
    UnknownFetch(String),
}
