use serde::Deserialize;

use crate::model::address::Address;
use crate::model::address::Owner;

/// Raw transaction block as returned by the ledger query API. Only the
/// fields the ingestor consumes are modeled; everything else on the wire
/// is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransactionBlock {
    pub digest: String,
    /// Epoch millis, transmitted as a decimal string.
    #[serde(default)]
    pub timestamp_ms: Option<String>,
    #[serde(default)]
    pub transaction: Option<RawTransaction>,
    #[serde(default)]
    pub effects: Option<RawEffects>,
    #[serde(default)]
    pub balance_changes: Vec<RawBalanceChange>,
    #[serde(default)]
    pub object_changes: Vec<RawObjectChange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub data: RawTransactionData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTransactionData {
    pub sender: Address,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEffects {
    pub status: RawExecutionStatus,
    pub gas_used: RawGasUsed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawExecutionStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Fee sub-components, decimal strings on the wire. The rebate can exceed
/// computation + storage, so the derived total is signed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGasUsed {
    pub computation_cost: String,
    pub storage_cost: String,
    pub storage_rebate: String,
}

/// A signed value movement attributed to an owner.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBalanceChange {
    pub owner: Owner,
    pub coin_type: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ChangeKind {
    Created,
    Mutated,
    Deleted,
    Wrapped,
    Published,
    Transferred,
    Unknown,
}

impl From<String> for ChangeKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "created" => ChangeKind::Created,
            "mutated" => ChangeKind::Mutated,
            "deleted" => ChangeKind::Deleted,
            "wrapped" => ChangeKind::Wrapped,
            "published" => ChangeKind::Published,
            "transferred" => ChangeKind::Transferred,
            _ => ChangeKind::Unknown,
        }
    }
}

/// Creation/mutation/transfer of a non-fungible ledger object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObjectChange {
    #[serde(rename = "type")]
    pub change_kind: ChangeKind,
    #[serde(default)]
    pub sender: Option<Address>,
    #[serde(default)]
    pub recipient: Option<Owner>,
}
