// Normalization pipeline: raw node response -> canonical TxDetails.
//
// Every step is synchronous, pure, and tolerant of partially-absent metadata.
// A malformed subfield degrades only its own output (empty keys, absent
// balances, null fee payer) and never prevents assembly of the rest.

use solana_transaction_status::option_serializer::OptionSerializer;
use solana_transaction_status::EncodedConfirmedTransactionWithStatusMeta;

use crate::transactions::keys::{resolve_account_keys, resolve_fee_payer};
use crate::transactions::types::{
    AccountDelta, LogKind, LogLine, TxDetails, TxStatus, TxSummary,
};

/// Pair resolved keys with the pre/post balance arrays.
///
/// Output length always equals the key count; balance arrays shorter than the
/// key list yield absent optional fields, never an out-of-range fault.
pub fn compute_deltas(keys: &[String], pre: &[u64], post: &[u64]) -> Vec<AccountDelta> {
    keys.iter()
        .enumerate()
        .map(|(i, pubkey)| AccountDelta {
            pubkey: pubkey.clone(),
            pre_balance_lamports: pre.get(i).copied(),
            post_balance_lamports: post.get(i).copied(),
        })
        .collect()
}

/// Classify one raw log line. First match wins: error markers, then program
/// output, then plain info. Only the "error" probe folds case.
pub fn classify_log(text: &str) -> LogKind {
    if text.contains("program failed") || text.to_lowercase().contains("error") {
        LogKind::Error
    } else if text.starts_with("Program ") || text.starts_with("Program log:") {
        LogKind::Program
    } else {
        LogKind::Info
    }
}

/// Compose the one-line summary from the raw transaction.
///
/// Absent metadata classifies as `Success`: the node recorded no failure, and
/// upstream display code has always relied on that fallback. `Unknown` stays
/// unused.
pub fn assemble_summary(
    signature: &str,
    raw: &EncodedConfirmedTransactionWithStatusMeta,
    keys: &[String],
) -> TxSummary {
    let meta = raw.transaction.meta.as_ref();
    let status = match meta {
        Some(m) if m.err.is_some() => TxStatus::Fail,
        _ => TxStatus::Success,
    };

    TxSummary {
        signature: signature.to_string(),
        slot: raw.slot,
        block_time: raw.block_time,
        status,
        fee_lamports: meta.map(|m| m.fee).unwrap_or(0),
        fee_payer: resolve_fee_payer(keys),
    }
}

/// Run the full normalization pipeline over one raw transaction.
///
/// Keys are resolved once and shared between the delta computer and the fee
/// payer. `instructions` and `transfers` are emitted empty for schema
/// stability.
pub fn build_details(
    signature: &str,
    raw: &EncodedConfirmedTransactionWithStatusMeta,
) -> TxDetails {
    let keys = resolve_account_keys(&raw.transaction);
    let meta = raw.transaction.meta.as_ref();

    let empty: Vec<u64> = Vec::new();
    let pre = meta.map(|m| &m.pre_balances).unwrap_or(&empty);
    let post = meta.map(|m| &m.post_balances).unwrap_or(&empty);
    let accounts = compute_deltas(&keys, pre, post);

    let logs = match meta.map(|m| &m.log_messages) {
        Some(OptionSerializer::Some(lines)) => lines
            .iter()
            .map(|text| LogLine {
                text: text.clone(),
                level: classify_log(text),
            })
            .collect(),
        _ => Vec::new(),
    };

    TxDetails {
        summary: assemble_summary(signature, raw, &keys),
        accounts,
        instructions: Vec::new(),
        transfers: Vec::new(),
        logs,
    }
}
