//! JSON-RPC transport for transaction lookups
//!
//! A thin, single-endpoint fetcher over reqwest. The node is treated as an
//! opaque collaborator: one `getTransaction` call per cache miss, with exactly
//! one automatic retry on a transport fault before the failure is surfaced.
//!
//! The `TransactionTransport` trait is the seam the details cache talks
//! through, so tests can substitute a counting mock for the real client.

use async_trait::async_trait;
use serde_json::{json, Value};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_transaction_status::EncodedConfirmedTransactionWithStatusMeta;
use std::time::Duration;
use tokio::time::sleep;

use crate::errors::FetchError;
use crate::logger::{self, LogTag};
use crate::transactions::utils::format_signature_short;

// =============================================================================
// FETCHER CONFIGURATION
// =============================================================================

/// Configuration for RPC fetching operations
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Commitment level for transaction queries
    pub commitment: CommitmentConfig,
    /// Total transport attempts per fetch (initial call + retries)
    pub max_transport_attempts: usize,
    /// Delay before the retry attempt (milliseconds)
    pub retry_delay_ms: u64,
    /// Per-request HTTP timeout (milliseconds)
    pub request_timeout_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            commitment: CommitmentConfig::confirmed(),
            // One automatic retry on transport faults, then surface the error
            max_transport_attempts: 2,
            retry_delay_ms: 500,
            request_timeout_ms: 15_000,
        }
    }
}

// =============================================================================
// TRANSPORT SEAM
// =============================================================================

/// The opaque transport collaborator in front of the normalization pipeline.
///
/// `Ok(None)` means the node has no record of the signature (unconfirmed or
/// unknown) — a normal outcome, not a fault.
#[async_trait]
pub trait TransactionTransport: Send + Sync {
    async fn fetch_transaction(
        &self,
        signature: &str,
        endpoint: &str,
    ) -> Result<Option<EncodedConfirmedTransactionWithStatusMeta>, FetchError>;
}

// =============================================================================
// RPC FETCHER
// =============================================================================

/// JSON-RPC transaction fetcher with bounded retry
pub struct RpcFetcher {
    http: reqwest::Client,
    config: FetcherConfig,
}

impl RpcFetcher {
    pub fn new() -> Self {
        Self::with_config(FetcherConfig::default())
    }

    pub fn with_config(config: FetcherConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { http, config }
    }

    /// Execute a raw JSON-RPC call against the endpoint
    async fn execute_raw(
        &self,
        endpoint: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, FetchError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("{} request failed: {}", method, e)))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| FetchError::MalformedResponse(format!("{} body: {}", method, e)))?;

        extract_result(payload, method)
    }

    /// Single `getTransaction` call, no retry
    async fn fetch_once(
        &self,
        signature: &str,
        endpoint: &str,
    ) -> Result<Option<EncodedConfirmedTransactionWithStatusMeta>, FetchError> {
        let params = json!([
            signature,
            {
                "encoding": "json",
                "commitment": commitment_name(self.config.commitment.commitment),
                "maxSupportedTransactionVersion": 0
            }
        ]);

        let result = self.execute_raw(endpoint, "getTransaction", params).await?;

        if result.is_null() {
            // Node has no record: unconfirmed or unknown signature
            return Ok(None);
        }

        let tx: EncodedConfirmedTransactionWithStatusMeta = serde_json::from_value(result)
            .map_err(|e| {
                FetchError::MalformedResponse(format!("getTransaction payload: {}", e))
            })?;
        Ok(Some(tx))
    }
}

impl Default for RpcFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionTransport for RpcFetcher {
    async fn fetch_transaction(
        &self,
        signature: &str,
        endpoint: &str,
    ) -> Result<Option<EncodedConfirmedTransactionWithStatusMeta>, FetchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.fetch_once(signature, endpoint).await {
                Ok(found) => {
                    if attempt > 1 {
                        logger::info(
                            LogTag::Rpc,
                            &format!(
                                "Transaction fetch succeeded after retry: {}",
                                format_signature_short(signature)
                            ),
                        );
                    }
                    return Ok(found);
                }
                Err(e) if attempt < self.config.max_transport_attempts => {
                    logger::warning(
                        LogTag::Rpc,
                        &format!(
                            "Transaction fetch attempt {} failed, retrying in {}ms: {}",
                            attempt, self.config.retry_delay_ms, e
                        ),
                    );
                    sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Wire name of a commitment level as the RPC API spells it
fn commitment_name(level: CommitmentLevel) -> &'static str {
    match level {
        CommitmentLevel::Processed => "processed",
        CommitmentLevel::Confirmed => "confirmed",
        CommitmentLevel::Finalized => "finalized",
    }
}

/// Surface the node's `error` object or hand back the `result` value
fn extract_result(payload: Value, method: &str) -> Result<Value, FetchError> {
    if let Some(err) = payload.get("error") {
        let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown rpc error");
        return Err(FetchError::Transport(format!(
            "{} rpc error {}: {}",
            method, code, message
        )));
    }

    match payload.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err(FetchError::MalformedResponse(format!(
            "{}: response has neither result nor error",
            method
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_result_ok() {
        let payload = json!({ "jsonrpc": "2.0", "id": 1, "result": { "slot": 5 } });
        let result = extract_result(payload, "getTransaction").unwrap();
        assert_eq!(result["slot"], 5);
    }

    #[test]
    fn test_extract_result_null_is_ok() {
        let payload = json!({ "jsonrpc": "2.0", "id": 1, "result": null });
        let result = extract_result(payload, "getTransaction").unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn test_extract_result_error_object() {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32004, "message": "Block not available" }
        });
        let err = extract_result(payload, "getTransaction").unwrap_err();
        match err {
            FetchError::Transport(msg) => {
                assert!(msg.contains("-32004"));
                assert!(msg.contains("Block not available"));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_result_missing_both() {
        let payload = json!({ "jsonrpc": "2.0", "id": 1 });
        let err = extract_result(payload, "getTransaction").unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn test_default_config_allows_one_retry() {
        let config = FetcherConfig::default();
        assert_eq!(config.max_transport_attempts, 2);
        assert_eq!(config.commitment, CommitmentConfig::confirmed());
    }
}
