// Public lookup surface for the transactions module
//
// Wires the real RPC fetcher behind the global details cache and gates every
// lookup on the signature format check, so validation failures never reach
// the transport.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::endpoints::Cluster;
use crate::errors::FetchError;
use crate::logger::{self, LogTag};
use crate::rpc::RpcFetcher;
use crate::transactions::cache::{DetailsCache, FetchOutcome, LookupKey};
use crate::transactions::utils::{format_signature_short, is_valid_signature};

// =============================================================================
// GLOBAL SERVICE STATE
// =============================================================================

/// Global details cache wired to the default RPC fetcher
static GLOBAL_DETAILS_CACHE: Lazy<Arc<DetailsCache>> =
    Lazy::new(|| Arc::new(DetailsCache::new(Arc::new(RpcFetcher::new()))));

/// Access the process-wide details cache
pub fn details_cache() -> Arc<DetailsCache> {
    Arc::clone(&GLOBAL_DETAILS_CACHE)
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Fetch and normalize one transaction by signature.
///
/// Returns `Ok(None)` when the node has no record of the signature (e.g. not
/// yet confirmed); fails only on an invalid signature format or a transport
/// fault that survived the permitted retry.
pub async fn get_transaction_details(
    signature: &str,
    cluster: Cluster,
    endpoint_override: Option<&str>,
) -> FetchOutcome {
    if !is_valid_signature(signature) {
        return Err(FetchError::InvalidSignature(signature.to_string()));
    }

    logger::debug(
        LogTag::Transactions,
        &format!(
            "LOOKUP {} on {}",
            format_signature_short(signature),
            cluster
        ),
    );

    let key = LookupKey::new(cluster, signature, endpoint_override);
    details_cache().get(key).await
}
