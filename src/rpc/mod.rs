pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::HttpLedgerClient;
pub use types::RawTransactionBlock;

use crate::error::ClientError;
use crate::model::address::Address;

/// Upstream collaborator contract consumed by the ingestor: two bounded
/// directional queries over the ledger's transaction history. Transport,
/// pagination and retry policy all live behind this seam.
#[async_trait]
pub trait LedgerQueryClient: Send + Sync {
    /// Transactions originated by the address, newest first.
    async fn query_by_originator(
        &self,
        address: Address,
        page_size: usize,
    ) -> Result<Vec<RawTransactionBlock>, ClientError>;

    /// Transactions directed to the address, newest first.
    async fn query_by_recipient(
        &self,
        address: Address,
        page_size: usize,
    ) -> Result<Vec<RawTransactionBlock>, ClientError>;
}
