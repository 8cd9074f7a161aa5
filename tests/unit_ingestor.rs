mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use pretty_assertions::assert_eq;

use common::*;
use shabaka::error::ClientError;
use shabaka::error::IngestError;
use shabaka::model::ExecutionStatus;
use shabaka::model::Owner;
use shabaka::pipeline::Ingestor;

const PAGE: usize = 50;

fn ingestor(client: MockLedgerClient) -> Ingestor<MockLedgerClient> {
    Ingestor::new(Arc::new(client), PAGE)
}

#[tokio::test]
async fn address_one_hex_char_short_fails_without_any_query() {
    // No expectations configured: any query issued here would panic
    let client = MockLedgerClient::new();
    let short = format!("0x{}", "a".repeat(63));

    let err = ingestor(client).ingest(&short).await.unwrap_err();

    assert!(matches!(err, IngestError::InvalidAddress(_)), "got {err:?}");
}

#[tokio::test]
async fn digest_seen_in_both_directions_yields_one_record() {
    let root = addr(0x11);
    let peer = addr(0xaa);

    let shared = with_balance_change(
        raw_block("SharedDigest", peer, 1_715_000_000_000),
        Owner::AddressOwner(root),
        900,
    );
    let out_only = with_balance_change(
        raw_block("OutboundDigest", root, 1_715_000_100_000),
        Owner::AddressOwner(peer),
        250,
    );

    let mut client = MockLedgerClient::new();
    let originated = vec![out_only, shared.clone()];
    client
        .expect_query_by_originator()
        .with(eq(root), eq(PAGE))
        .times(1)
        .return_once(move |_, _| Ok(originated));
    client
        .expect_query_by_recipient()
        .with(eq(root), eq(PAGE))
        .times(1)
        .return_once(move |_, _| Ok(vec![shared]));

    let records = ingestor(client).fetch(root).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records.iter().filter(|r| r.id.0 == "SharedDigest").count(), 1);
}

#[tokio::test]
async fn positive_balance_changes_drive_recipients_and_amount() {
    let root = addr(0x11);
    let a = addr(0xaa);
    let b = addr(0xbb);

    let block = raw_block("Tx", root, 1_715_000_000_000);
    let block = with_balance_change(block, Owner::AddressOwner(a), 600);
    let block = with_balance_change(block, Owner::AddressOwner(b), 300);
    // The sender's own negative movement must contribute nothing
    let block = with_balance_change(block, Owner::AddressOwner(root), -900);
    // Negative amounts never make a recipient
    let block = with_balance_change(block, Owner::AddressOwner(addr(0xcc)), -10);
    // Non-address owners are not recipients
    let block = with_balance_change(
        block,
        Owner::Shared { object_id: shabaka::model::ObjectId("0xobj".to_string()) },
        50,
    );

    let mut client = MockLedgerClient::new();
    client
        .expect_query_by_originator()
        .times(1)
        .return_once(move |_, _| Ok(vec![block]));
    client.expect_query_by_recipient().times(1).return_once(|_, _| Ok(vec![]));

    let records = ingestor(client).fetch(root).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].recipients, vec![a, b]);
    assert_eq!(records[0].amount, 900);
}

#[tokio::test]
async fn object_transfers_are_the_fallback_and_carry_no_amount() {
    let root = addr(0x11);
    let receiver = addr(0xaa);

    let block = raw_block("ObjTx", root, 1_715_000_000_000);
    let block = with_object_transfer(block, Owner::AddressOwner(receiver));

    let mut client = MockLedgerClient::new();
    client
        .expect_query_by_originator()
        .times(1)
        .return_once(move |_, _| Ok(vec![block]));
    client.expect_query_by_recipient().times(1).return_once(|_, _| Ok(vec![]));

    let records = ingestor(client).fetch(root).await.unwrap();

    assert_eq!(records[0].recipients, vec![receiver]);
    assert_eq!(records[0].amount, 0);
}

#[tokio::test]
async fn balance_change_recipients_suppress_object_fallback() {
    let root = addr(0x11);
    let paid = addr(0xaa);
    let object_receiver = addr(0xbb);

    let block = raw_block("MixedTx", root, 1_715_000_000_000);
    let block = with_balance_change(block, Owner::AddressOwner(paid), 400);
    let block = with_object_transfer(block, Owner::AddressOwner(object_receiver));

    let mut client = MockLedgerClient::new();
    client
        .expect_query_by_originator()
        .times(1)
        .return_once(move |_, _| Ok(vec![block]));
    client.expect_query_by_recipient().times(1).return_once(|_, _| Ok(vec![]));

    let records = ingestor(client).fetch(root).await.unwrap();

    assert_eq!(records[0].recipients, vec![paid]);
}

#[tokio::test]
async fn zero_recipient_transactions_are_retained() {
    let root = addr(0x11);
    let block = raw_block("BareTx", root, 1_715_000_000_000);

    let mut client = MockLedgerClient::new();
    client
        .expect_query_by_originator()
        .times(1)
        .return_once(move |_, _| Ok(vec![block]));
    client.expect_query_by_recipient().times(1).return_once(|_, _| Ok(vec![]));

    let records = ingestor(client).fetch(root).await.unwrap();

    assert_eq!(records.len(), 1);
    assert!(records[0].recipients.is_empty());
}

#[tokio::test]
async fn gas_sign_is_preserved_when_rebate_exceeds_cost() {
    let root = addr(0x11);
    let mut block = raw_block("RebateTx", root, 1_715_000_000_000);
    if let Some(effects) = block.effects.as_mut() {
        effects.gas_used.computation_cost = "1000".to_string();
        effects.gas_used.storage_cost = "500".to_string();
        effects.gas_used.storage_rebate = "2000".to_string();
        effects.status.status = "failure".to_string();
    }

    let mut client = MockLedgerClient::new();
    client
        .expect_query_by_originator()
        .times(1)
        .return_once(move |_, _| Ok(vec![block]));
    client.expect_query_by_recipient().times(1).return_once(|_, _| Ok(vec![]));

    let records = ingestor(client).fetch(root).await.unwrap();

    assert_eq!(records[0].gas_used, -500);
    assert_eq!(records[0].status, ExecutionStatus::Failure);
}

#[tokio::test]
async fn transport_failure_maps_to_network_error() {
    let root = addr(0x11);

    let mut client = MockLedgerClient::new();
    client
        .expect_query_by_originator()
        .times(1)
        .return_once(|_, _| Err(ClientError::Transport("connection refused".to_string())));

    let err = ingestor(client).fetch(root).await.unwrap_err();

    assert!(matches!(err, IngestError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn rpc_failure_maps_to_unknown_fetch_error() {
    let root = addr(0x11);

    let mut client = MockLedgerClient::new();
    client
        .expect_query_by_originator()
        .times(1)
        .return_once(|_, _| Ok(vec![]));
    client.expect_query_by_recipient().times(1).return_once(|_, _| {
        Err(ClientError::Rpc { code: -32602, message: "Invalid params".to_string() })
    });

    let err = ingestor(client).fetch(root).await.unwrap_err();

    assert!(matches!(err, IngestError::UnknownFetch(_)), "got {err:?}");
}

#[tokio::test]
async fn records_come_back_sorted_by_timestamp_then_digest() {
    let root = addr(0x11);
    let peer = addr(0xaa);

    let newer = with_balance_change(
        raw_block("B-Newer", root, 1_715_000_200_000),
        Owner::AddressOwner(peer),
        1,
    );
    let older = with_balance_change(
        raw_block("A-Older", root, 1_715_000_000_000),
        Owner::AddressOwner(peer),
        1,
    );

    let mut client = MockLedgerClient::new();
    client
        .expect_query_by_originator()
        .times(1)
        .return_once(move |_, _| Ok(vec![newer, older]));
    client.expect_query_by_recipient().times(1).return_once(|_, _| Ok(vec![]));

    let records = ingestor(client).fetch(root).await.unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.0.as_str()).collect();
    assert_eq!(ids, vec!["A-Older", "B-Newer"]);
}
