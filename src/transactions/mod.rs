//! Transaction lookup and normalization
//!
//! Everything between the raw node response and the canonical `TxDetails`
//! view model: account-key resolution across message encodings, balance-delta
//! pairing, log classification, summary assembly, and the request-coalescing
//! details cache in front of the transport.

pub mod cache;
pub mod keys;
pub mod normalizer;
pub mod service;
pub mod types;
pub mod utils;

pub use cache::{DetailsCache, LookupKey};
pub use keys::{resolve_account_keys, resolve_fee_payer, MessageAccounts};
pub use normalizer::{assemble_summary, build_details, classify_log, compute_deltas};
pub use service::get_transaction_details;
pub use types::*;
pub use utils::{format_signature_short, is_valid_signature};

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared raw-transaction fixtures, decoded through the real
    //! solana-transaction-status serde path so tests exercise the same wire
    //! shapes the node produces.

    use serde_json::{json, Value};
    use solana_transaction_status::EncodedConfirmedTransactionWithStatusMeta;

    /// Minimal raw message header; contents are irrelevant to key resolution
    pub fn header() -> Value {
        json!({
            "numRequiredSignatures": 1,
            "numReadonlySignedAccounts": 0,
            "numReadonlyUnsignedAccounts": 1
        })
    }

    /// Legacy-shaped transaction: flat account-key list, no lookup tables
    pub fn legacy_raw_tx(account_keys: &[&str], meta: Value) -> EncodedConfirmedTransactionWithStatusMeta {
        decode(json!({
            "slot": 100u64,
            "blockTime": 1_700_000_000i64,
            "transaction": {
                "signatures": ["sig"],
                "message": {
                    "header": header(),
                    "accountKeys": account_keys,
                    "recentBlockhash": "11111111111111111111111111111111",
                    "instructions": []
                }
            },
            "meta": meta
        }))
    }

    /// Versioned-shaped transaction: static keys plus lookup-resolved
    /// writable/readonly keys delivered through meta.loadedAddresses
    pub fn versioned_raw_tx(
        static_keys: &[&str],
        writable: &[&str],
        readonly: &[&str],
    ) -> EncodedConfirmedTransactionWithStatusMeta {
        decode(json!({
            "slot": 200u64,
            "blockTime": null,
            "version": 0,
            "transaction": {
                "signatures": ["sig"],
                "message": {
                    "header": header(),
                    "accountKeys": static_keys,
                    "recentBlockhash": "11111111111111111111111111111111",
                    "instructions": []
                }
            },
            "meta": {
                "err": null,
                "status": { "Ok": null },
                "fee": 5000u64,
                "preBalances": [],
                "postBalances": [],
                "loadedAddresses": { "writable": writable, "readonly": readonly }
            }
        }))
    }

    /// Successful metadata with the given fee and balance arrays
    pub fn success_meta(fee: u64, pre: &[u64], post: &[u64], logs: &[&str]) -> Value {
        json!({
            "err": null,
            "status": { "Ok": null },
            "fee": fee,
            "preBalances": pre,
            "postBalances": post,
            "logMessages": logs
        })
    }

    pub fn decode(value: Value) -> EncodedConfirmedTransactionWithStatusMeta {
        serde_json::from_value(value).expect("fixture must decode as a confirmed transaction")
    }
}
