#![allow(dead_code)]

use async_trait::async_trait;
use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;

use shabaka::error::ClientError;
use shabaka::model::Address;
use shabaka::model::Digest;
use shabaka::model::ExecutionStatus;
use shabaka::model::FlowGraph;
use shabaka::model::Owner;
use shabaka::model::TransactionRecord;
use shabaka::rpc::types::ChangeKind;
use shabaka::rpc::types::RawBalanceChange;
use shabaka::rpc::types::RawEffects;
use shabaka::rpc::types::RawExecutionStatus;
use shabaka::rpc::types::RawGasUsed;
use shabaka::rpc::types::RawObjectChange;
use shabaka::rpc::types::RawTransaction;
use shabaka::rpc::types::RawTransactionData;
use shabaka::rpc::types::RawTransactionBlock;
use shabaka::rpc::LedgerQueryClient;

pub const COIN: &str = "0x2::sui::SUI";

mockall::mock! {
    pub LedgerClient {}

    #[async_trait]
    impl LedgerQueryClient for LedgerClient {
        async fn query_by_originator(
            &self,
            address: Address,
            page_size: usize,
        ) -> Result<Vec<RawTransactionBlock>, ClientError>;

        async fn query_by_recipient(
            &self,
            address: Address,
            page_size: usize,
        ) -> Result<Vec<RawTransactionBlock>, ClientError>;
    }
}

/// Deterministic address filled with one byte, e.g. 0xaaaa…aa.
pub fn addr(byte: u8) -> Address {
    Address::new([byte; 32])
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap()
}

pub fn record(digest: &str, sender: Address, recipients: &[Address], amount: u64) -> TransactionRecord {
    record_at(digest, sender, recipients, amount, fixed_time())
}

pub fn record_at(
    digest: &str,
    sender: Address,
    recipients: &[Address],
    amount: u64,
    timestamp: DateTime<Utc>,
) -> TransactionRecord {
    TransactionRecord {
        id: Digest::from(digest),
        timestamp,
        sender,
        recipients: recipients.to_vec(),
        amount,
        gas_used: 1_300,
        status: ExecutionStatus::Success,
    }
}

pub fn raw_block(digest: &str, sender: Address, timestamp_ms: i64) -> RawTransactionBlock {
    RawTransactionBlock {
        digest: digest.to_string(),
        timestamp_ms: Some(timestamp_ms.to_string()),
        transaction: Some(RawTransaction { data: RawTransactionData { sender } }),
        effects: Some(RawEffects {
            status: RawExecutionStatus { status: "success".to_string(), error: None },
            gas_used: RawGasUsed {
                computation_cost: "1000".to_string(),
                storage_cost: "500".to_string(),
                storage_rebate: "200".to_string(),
            },
        }),
        balance_changes: Vec::new(),
        object_changes: Vec::new(),
    }
}

pub fn with_balance_change(mut block: RawTransactionBlock, owner: Owner, amount: i128) -> RawTransactionBlock {
    block.balance_changes.push(RawBalanceChange {
        owner,
        coin_type: COIN.to_string(),
        amount: amount.to_string(),
    });
    block
}

pub fn with_object_transfer(mut block: RawTransactionBlock, recipient: Owner) -> RawTransactionBlock {
    let sender = block.transaction.as_ref().map(|tx| tx.data.sender);
    block.object_changes.push(RawObjectChange {
        change_kind: ChangeKind::Transferred,
        sender,
        recipient: Some(recipient),
    });
    block
}

/// Sorted node ids, for structural comparisons.
pub fn node_ids(graph: &FlowGraph) -> Vec<String> {
    let mut ids: Vec<String> = graph.nodes().iter().map(|node| node.address.to_string()).collect();
    ids.sort();
    ids
}

/// Sorted (source, target, transaction) triples, for structural comparisons.
pub fn edge_triples(graph: &FlowGraph) -> Vec<(String, String, String)> {
    let mut triples: Vec<(String, String, String)> = graph
        .edges()
        .iter()
        .map(|edge| {
            (
                edge.source.to_string(),
                edge.target.to_string(),
                edge.transaction_id.to_string(),
            )
        })
        .collect();
    triples.sort();
    triples
}
