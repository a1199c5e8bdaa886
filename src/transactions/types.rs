// =============================================================================
// CORE DATA STRUCTURES
// =============================================================================

use serde::{Deserialize, Serialize};

/// Outcome recorded in the transaction's metadata.
///
/// `Unknown` exists for schema parity but is never produced: metadata that is
/// entirely absent is indistinguishable from "no failure recorded" and is
/// classified `Success`, matching the upstream behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Fail,
    Unknown,
}

/// One-line transaction summary for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxSummary {
    pub signature: String,
    pub slot: u64,
    /// Block time as epoch seconds, when the node reports one
    pub block_time: Option<i64>,
    pub status: TxStatus,
    pub fee_lamports: u64,
    /// First account of the resolved key list, None when no keys resolved
    pub fee_payer: Option<String>,
}

/// Pre/post balance snapshot for one participant account.
///
/// Index-aligned to the resolved key sequence; a balance is absent when the
/// corresponding array from the node is shorter than the key list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDelta {
    pub pubkey: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_balance_lamports: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_balance_lamports: Option<u64>,
}

/// Severity/origin category of a diagnostic log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Error,
    Program,
}

/// One classified log line, order-preserving relative to the raw list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub text: String,
    pub level: LogKind,
}

/// Decoded instruction placeholder.
///
/// Instruction-level decoding is not implemented; the type is kept so the
/// `TxDetails` schema stays stable for display code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionItem {
    pub index: usize,
    pub program_id: String,
    pub accounts: Vec<String>,
}

/// Paired transfer placeholder, same status as `InstructionItem`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferItem {
    pub kind: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lamports: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint: Option<String>,
}

/// Canonical normalized view of one transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxDetails {
    pub summary: TxSummary,
    pub accounts: Vec<AccountDelta>,
    /// Always empty; present for schema stability
    pub instructions: Vec<InstructionItem>,
    /// Always empty; present for schema stability
    pub transfers: Vec<TransferItem>,
    pub logs: Vec<LogLine>,
}
