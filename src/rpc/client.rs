use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::types::RawTransactionBlock;
use super::LedgerQueryClient;
use crate::config::RpcConfig;
use crate::error::ClientError;
use crate::model::address::Address;

const QUERY_METHOD: &str = "suix_queryTransactionBlocks";

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<QueryPage>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryPage {
    data: Vec<RawTransactionBlock>,
    #[serde(default)]
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// JSON-RPC implementation of the ledger query contract. One bounded page
/// per call, descending order; a reported next page is logged and dropped.
pub struct HttpLedgerClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpLedgerClient {
    pub fn new(config: &RpcConfig) -> Result<Self, ClientError> {
        let endpoint =
            Url::parse(&config.url).map_err(|e| ClientError::Transport(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { http, endpoint })
    }

    async fn query_transaction_blocks(
        &self,
        filter: Value,
        page_size: usize,
    ) -> Result<Vec<RawTransactionBlock>, ClientError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": QUERY_METHOD,
            "params": [
                {
                    "filter": filter,
                    "options": {
                        "showInput": true,
                        "showEffects": true,
                        "showBalanceChanges": true,
                        "showObjectChanges": true,
                    },
                },
                Value::Null,
                page_size,
                true,
            ],
        });

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let payload = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let envelope: RpcEnvelope = serde_json::from_str(&payload)?;

        if let Some(error) = envelope.error {
            return Err(ClientError::Rpc { code: error.code, message: error.message });
        }
        let page = envelope.result.ok_or(ClientError::MalformedEnvelope)?;

        if page.has_next_page {
            debug!("query_transaction_blocks::history_truncated_at_page_bound::{}", page_size);
        }

        Ok(page.data)
    }
}

#[async_trait]
impl LedgerQueryClient for HttpLedgerClient {
    async fn query_by_originator(
        &self,
        address: Address,
        page_size: usize,
    ) -> Result<Vec<RawTransactionBlock>, ClientError> {
        debug!("query_by_originator::{}", address);
        self.query_transaction_blocks(json!({ "FromAddress": address.to_string() }), page_size)
            .await
    }

    async fn query_by_recipient(
        &self,
        address: Address,
        page_size: usize,
    ) -> Result<Vec<RawTransactionBlock>, ClientError> {
        debug!("query_by_recipient::{}", address);
        self.query_transaction_blocks(json!({ "ToAddress": address.to_string() }), page_size)
            .await
    }
}
