use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::error::ClientError;
use crate::error::IngestError;
use crate::model::address::Address;
use crate::model::address::Owner;
use crate::model::transaction::Digest;
use crate::model::transaction::ExecutionStatus;
use crate::model::transaction::TransactionRecord;
use crate::rpc::types::ChangeKind;
use crate::rpc::types::RawTransactionBlock;
use crate::rpc::LedgerQueryClient;
use crate::utils::timestamp_from_millis;

/// Validates an address, runs the two directional queries and merges the
/// responses into canonical deduplicated records. No retries here; retry
/// policy, if any, belongs to the transport collaborator.
pub struct Ingestor<C> {
    client: Arc<C>,
    page_size: usize,
}

impl<C: LedgerQueryClient> Ingestor<C> {
    pub fn new(client: Arc<C>, page_size: usize) -> Self {
        Self { client, page_size }
    }

    /// Fails fast with `InvalidAddress` before any network access.
    pub async fn ingest(&self, address: &str) -> Result<Vec<TransactionRecord>, IngestError> {
        let parsed = address
            .parse::<Address>()
            .map_err(|e| IngestError::InvalidAddress(e.to_string()))?;
        self.fetch(parsed).await
    }

    /// Same as [`Ingestor::ingest`] for an already-validated address.
    pub async fn fetch(&self, address: Address) -> Result<Vec<TransactionRecord>, IngestError> {
        let mut merged: HashMap<Digest, TransactionRecord> = HashMap::new();

        let originated = self
            .client
            .query_by_originator(address, self.page_size)
            .await
            .map_err(|e| map_client_error("originator", e))?;
        merge_raw_blocks(originated, &mut merged);

        let received = self
            .client
            .query_by_recipient(address, self.page_size)
            .await
            .map_err(|e| map_client_error("recipient", e))?;
        merge_raw_blocks(received, &mut merged);

        debug!("ingest::{}::unique_transactions::{}", address, merged.len());

        let mut records: Vec<TransactionRecord> = merged.into_values().collect();
        // Stable output for a given history; map iteration order must not leak
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}

fn map_client_error(direction: &str, err: ClientError) -> IngestError {
    if err.is_transport() {
        IngestError::Network(format!("{direction} query: {err}"))
    } else {
        IngestError::UnknownFetch(format!("{direction} query: {err}"))
    }
}

/// Add-if-absent merge: a digest already present is processed exactly
/// once, no matter how many directional queries returned it.
fn merge_raw_blocks(blocks: Vec<RawTransactionBlock>, merged: &mut HashMap<Digest, TransactionRecord>) {
    for block in blocks {
        let digest = Digest(block.digest.clone());
        if merged.contains_key(&digest) {
            continue;
        }
        match record_from_block(block) {
            Some(record) => {
                merged.insert(digest, record);
            }
            None => warn!("ingest::skipping_block_without_sender::{}", digest),
        }
    }
}

fn record_from_block(block: RawTransactionBlock) -> Option<TransactionRecord> {
    let sender = block.transaction.as_ref()?.data.sender;

    let (recipients, amount) = derive_recipients(&block, sender);

    let timestamp_millis = block
        .timestamp_ms
        .as_deref()
        .and_then(|ms| ms.parse::<i64>().ok())
        .unwrap_or(0);

    let (status, gas_used) = match &block.effects {
        Some(effects) => {
            let status = if effects.status.status == "success" {
                ExecutionStatus::Success
            } else {
                ExecutionStatus::Failure
            };
            (status, gas_total(&effects.gas_used))
        }
        None => (ExecutionStatus::Failure, 0),
    };

    Some(TransactionRecord {
        id: Digest(block.digest),
        timestamp: timestamp_from_millis(timestamp_millis),
        sender,
        recipients,
        amount,
        gas_used,
        status,
    })
}

/// Recipient/amount derivation precedence: (a) positive balance changes
/// owned by a non-sender address; (b) if none, `transferred` object
/// changes with an address recipient, which carry no separable value;
/// (c) otherwise the record keeps an empty recipient list.
fn derive_recipients(block: &RawTransactionBlock, sender: Address) -> (Vec<Address>, u64) {
    let mut recipients: Vec<Address> = Vec::new();
    let mut amount: u64 = 0;

    for change in &block.balance_changes {
        match &change.owner {
            Owner::AddressOwner(owner) if *owner != sender => {
                let signed = change.amount.parse::<i128>().unwrap_or(0);
                if signed > 0 {
                    if !recipients.contains(owner) {
                        recipients.push(*owner);
                    }
                    amount = amount.saturating_add(signed.min(u64::MAX as i128) as u64);
                }
            }
            Owner::AddressOwner(_) | Owner::ObjectOwner(_) | Owner::Shared { .. } | Owner::Immutable => {}
        }
    }

    if recipients.is_empty() {
        for change in &block.object_changes {
            if change.change_kind != ChangeKind::Transferred {
                continue;
            }
            match &change.recipient {
                Some(Owner::AddressOwner(recipient)) if *recipient != sender => {
                    if !recipients.contains(recipient) {
                        recipients.push(*recipient);
                    }
                }
                Some(Owner::AddressOwner(_))
                | Some(Owner::ObjectOwner(_))
                | Some(Owner::Shared { .. })
                | Some(Owner::Immutable)
                | None => {}
            }
        }
    }

    (recipients, amount)
}

fn gas_total(gas: &crate::rpc::types::RawGasUsed) -> i64 {
    let computation = gas.computation_cost.parse::<i64>().unwrap_or(0);
    let storage = gas.storage_cost.parse::<i64>().unwrap_or(0);
    let rebate = gas.storage_rebate.parse::<i64>().unwrap_or(0);
    computation + storage - rebate
}
