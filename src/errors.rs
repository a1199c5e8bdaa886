//! Structured error handling for txlens
//!
//! One crate-wide error type covering the failure taxonomy of the fetch
//! pipeline. A transaction the node has no record of is NOT an error: the
//! service returns `Ok(None)` for that case so callers can treat it as a
//! normal, retryable outcome.

use thiserror::Error;

/// Failures surfaced by the fetch-and-normalize pipeline.
///
/// `Clone` is required so a single in-flight fetch can fan the same outcome
/// out to every coalesced waiter; transport details are therefore carried as
/// rendered strings rather than source error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Signature failed the client-side format gate; no transport call was made
    #[error("invalid transaction signature: {0}")]
    InvalidSignature(String),

    /// Network/timeout/node fault from the RPC endpoint, after the permitted retry
    #[error("rpc transport error: {0}")]
    Transport(String),

    /// The node answered but the payload could not be decoded
    #[error("malformed rpc response: {0}")]
    MalformedResponse(String),
}
