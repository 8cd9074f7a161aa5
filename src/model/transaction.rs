use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::model::address::Address;

/// Unique identifier of a ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(pub String);

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Digest {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Failure,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionStatus::Success)
    }
}

/// Canonical deduplicated transaction, keyed by digest. Immutable once
/// ingested; the graph and filter layers only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Digest,
    pub timestamp: DateTime<Utc>,
    pub sender: Address,
    /// Addresses that received value or objects. May be empty; such a
    /// record still contributes its sender node but no edges.
    pub recipients: Vec<Address>,
    /// Approximate total value moved to non-sender parties, smallest unit.
    pub amount: u64,
    /// computation + storage - rebate. Negative when the rebate exceeds
    /// the cost; the sign is preserved.
    pub gas_used: i64,
    pub status: ExecutionStatus,
}

impl TransactionRecord {
    /// True when this record's sender/recipient pair matches the two
    /// endpoints, in either direction. Drives the renderer's
    /// edge-activation lookup.
    pub fn involves_pair(&self, a: &Address, b: &Address) -> bool {
        (self.sender == *a && self.recipients.contains(b))
            || (self.sender == *b && self.recipients.contains(a))
    }
}
