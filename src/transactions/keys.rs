// Account-key resolution across the two wire encodings of a transaction
// message.
//
// Legacy messages inline the full, ordered account list. Versioned messages
// carry only the static keys; accounts referenced through address-lookup
// tables are resolved by the serving node and returned separately as
// writable/readonly lists in the metadata. The canonical order is static keys,
// then lookup-resolved writable, then lookup-resolved readonly — the same
// order the node uses for the pre/post balance arrays.

use solana_transaction_status::option_serializer::OptionSerializer;
use solana_sdk::transaction::TransactionVersion;
use solana_transaction_status::{
    EncodedTransaction, EncodedTransactionWithStatusMeta, UiMessage,
};

/// The account-list shape of a raw transaction, decoded once at the transport
/// boundary instead of duck-probed at every use site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageAccounts {
    /// Flat, fully-inlined account-key list (legacy encoding, or a payload
    /// where the node already expanded lookup accounts inline)
    Legacy { keys: Vec<String> },
    /// Versioned encoding: static keys plus node-resolved lookup accounts
    Versioned {
        static_keys: Vec<String>,
        loaded_writable: Vec<String>,
        loaded_readonly: Vec<String>,
    },
    /// Binary or otherwise unsupported payload; resolves to no keys
    Unrecognized,
}

/// Decode the account-list shape of an encoded transaction.
///
/// Never fails: payloads that fit neither shape come back `Unrecognized`, and
/// downstream components treat that as an empty key sequence.
pub fn decode_message_accounts(tx: &EncodedTransactionWithStatusMeta) -> MessageAccounts {
    match &tx.transaction {
        EncodedTransaction::Json(ui_tx) => match &ui_tx.message {
            UiMessage::Raw(raw) => {
                let static_keys = raw.account_keys.clone();
                if matches!(tx.version, Some(TransactionVersion::Number(_))) {
                    let (loaded_writable, loaded_readonly) = loaded_addresses(tx);
                    MessageAccounts::Versioned {
                        static_keys,
                        loaded_writable,
                        loaded_readonly,
                    }
                } else {
                    MessageAccounts::Legacy { keys: static_keys }
                }
            }
            // jsonParsed payloads inline lookup-resolved keys after the static
            // ones, so the list is already complete and ordered
            UiMessage::Parsed(parsed) => MessageAccounts::Legacy {
                keys: parsed
                    .account_keys
                    .iter()
                    .map(|account| account.pubkey.clone())
                    .collect(),
            },
        },
        EncodedTransaction::Accounts(list) => MessageAccounts::Legacy {
            keys: list
                .account_keys
                .iter()
                .map(|account| account.pubkey.clone())
                .collect(),
        },
        _ => MessageAccounts::Unrecognized,
    }
}

fn loaded_addresses(tx: &EncodedTransactionWithStatusMeta) -> (Vec<String>, Vec<String>) {
    match tx.meta.as_ref().map(|meta| &meta.loaded_addresses) {
        Some(OptionSerializer::Some(loaded)) => (loaded.writable.clone(), loaded.readonly.clone()),
        _ => (Vec::new(), Vec::new()),
    }
}

/// Ordered, base58-encoded participant addresses of a transaction.
///
/// Empty when the payload shape is unrecognized; callers must tolerate an
/// empty sequence (zero deltas, no fee payer).
pub fn resolve_account_keys(tx: &EncodedTransactionWithStatusMeta) -> Vec<String> {
    match decode_message_accounts(tx) {
        MessageAccounts::Legacy { keys } => keys,
        MessageAccounts::Versioned {
            mut static_keys,
            loaded_writable,
            loaded_readonly,
        } => {
            static_keys.extend(loaded_writable);
            static_keys.extend(loaded_readonly);
            static_keys
        }
        MessageAccounts::Unrecognized => Vec::new(),
    }
}

/// Canonical fee payer: by protocol convention the first account in the key
/// list is the signer debited for the fee. No heuristic fallback — signer
/// flags are not available at this stage of parsing.
pub fn resolve_fee_payer(keys: &[String]) -> Option<String> {
    keys.first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::testutil::{decode, legacy_raw_tx, success_meta, versioned_raw_tx};
    use serde_json::json;

    #[test]
    fn test_legacy_keys_verbatim() {
        let raw = legacy_raw_tx(&["A", "B", "C"], success_meta(5000, &[], &[], &[]));
        assert_eq!(resolve_account_keys(&raw.transaction), vec!["A", "B", "C"]);
        assert_eq!(
            decode_message_accounts(&raw.transaction),
            MessageAccounts::Legacy {
                keys: vec!["A".to_string(), "B".to_string(), "C".to_string()]
            }
        );
    }

    #[test]
    fn test_versioned_static_then_writable_then_readonly() {
        let raw = versioned_raw_tx(&["A"], &["B"], &["C"]);
        assert_eq!(resolve_account_keys(&raw.transaction), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_versioned_without_lookup_accounts() {
        let raw = versioned_raw_tx(&["A", "B"], &[], &[]);
        assert_eq!(resolve_account_keys(&raw.transaction), vec!["A", "B"]);
    }

    #[test]
    fn test_binary_payload_resolves_no_keys() {
        // Base58 blob instead of a json message
        let raw = decode(json!({
            "slot": 1u64,
            "blockTime": null,
            "transaction": "4hXTCkRzt9WyecNzV1XPgCDfGAZzQKNxLXgynz5QDuWWPSAZBZSHptvWRL3BjCvzUXRdKvHL2b7yGrRQcWyaqsaBCncVG7",
            "meta": null
        }));
        assert_eq!(
            decode_message_accounts(&raw.transaction),
            MessageAccounts::Unrecognized
        );
        assert!(resolve_account_keys(&raw.transaction).is_empty());
    }

    #[test]
    fn test_fee_payer_first_key_or_none() {
        assert_eq!(resolve_fee_payer(&[]), None);
        assert_eq!(
            resolve_fee_payer(&["X".to_string(), "Y".to_string()]),
            Some("X".to_string())
        );
    }
}
