// Shared helpers for the transactions module

/// Quick client-side gate for transaction signatures.
///
/// Accepts strings made only of base58 characters with length 32..=100. The
/// range is intentionally loose (64-byte signatures encode to 87-88 chars):
/// this is a format gate, not a cryptographic check, and false positives are
/// caught when the node reports the transaction as not found.
pub fn is_valid_signature(signature: &str) -> bool {
    if signature.len() < 32 || signature.len() > 100 {
        return false;
    }
    // bs58 decoding succeeds iff every character is in the base58 alphabet
    bs58::decode(signature).into_vec().is_ok()
}

/// Shortened signature for log lines: first 8 chars + ellipsis
pub fn format_signature_short(signature: &str) -> String {
    if signature.len() <= 12 {
        signature.to_string()
    } else {
        format!("{}...", &signature[..8])
    }
}
