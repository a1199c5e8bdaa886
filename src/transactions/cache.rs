// Request-deduplicating, time-bounded cache in front of the fetch-and-
// normalize pipeline.
//
// One transport call per concurrent burst of identical lookups: requests for
// a key arriving while a fetch is in flight attach to the same shared
// completion handle instead of issuing a second call. Only successful
// normalizations enter the TTL map — a not-found result may confirm later and
// a fault must get a fresh attempt, so neither is cached.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::endpoints::{resolve_endpoint, Cluster};
use crate::errors::FetchError;
use crate::logger::{self, LogTag};
use crate::rpc::TransactionTransport;
use crate::transactions::normalizer::build_details;
use crate::transactions::types::TxDetails;
use crate::transactions::utils::format_signature_short;

/// Default staleness threshold for cached details
pub const DEFAULT_STALENESS_MS: u64 = 60_000;

/// Outcome of one lookup: details, a normal not-found, or a transport fault
pub type FetchOutcome = Result<Option<TxDetails>, FetchError>;

type SharedFetch = Shared<BoxFuture<'static, FetchOutcome>>;

type EntryMap = HashMap<LookupKey, CachedDetails>;
type PendingMap = HashMap<LookupKey, SharedFetch>;

/// Cache identity of a lookup. A different cluster, signature, or endpoint
/// override is a different entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub cluster: Cluster,
    pub signature: String,
    pub endpoint_override: Option<String>,
}

impl LookupKey {
    pub fn new(cluster: Cluster, signature: &str, endpoint_override: Option<&str>) -> Self {
        Self {
            cluster,
            signature: signature.to_string(),
            // A blank override is the same lookup as no override
            endpoint_override: endpoint_override
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

struct CachedDetails {
    details: TxDetails,
    fetched_at: Instant,
}

impl CachedDetails {
    fn is_expired(&self, staleness: Duration) -> bool {
        self.fetched_at.elapsed() > staleness
    }
}

/// Details cache with in-flight request coalescing
pub struct DetailsCache {
    transport: Arc<dyn TransactionTransport>,
    staleness: Duration,
    entries: Arc<Mutex<EntryMap>>,
    pending: Arc<Mutex<PendingMap>>,
}

impl DetailsCache {
    pub fn new(transport: Arc<dyn TransactionTransport>) -> Self {
        Self::with_staleness(transport, Duration::from_millis(DEFAULT_STALENESS_MS))
    }

    pub fn with_staleness(transport: Arc<dyn TransactionTransport>, staleness: Duration) -> Self {
        Self {
            transport,
            staleness,
            entries: Arc::new(Mutex::new(HashMap::new())),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Look up a transaction, serving from cache when fresh and coalescing
    /// concurrent requests for the same key onto one transport call
    pub async fn get(&self, key: LookupKey) -> FetchOutcome {
        if let Some(details) = self.fresh_entry(&key) {
            logger::debug(
                LogTag::Cache,
                &format!("HIT {}", format_signature_short(&key.signature)),
            );
            return Ok(Some(details));
        }

        self.join_or_start(key).await
    }

    /// Number of stored entries (fresh and stale)
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all stored entries; in-flight fetches are unaffected
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn fresh_entry(&self, key: &LookupKey) -> Option<TxDetails> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if !entry.is_expired(self.staleness) => Some(entry.details.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Attach to the in-flight fetch for this key, starting one if none exists
    fn join_or_start(&self, key: LookupKey) -> SharedFetch {
        let mut pending = self.pending.lock().unwrap();
        if let Some(inflight) = pending.get(&key) {
            logger::debug(
                LogTag::Cache,
                &format!("JOIN {}", format_signature_short(&key.signature)),
            );
            return inflight.clone();
        }

        let transport = Arc::clone(&self.transport);
        let entries = Arc::clone(&self.entries);
        let pending_table = Arc::clone(&self.pending);
        let fetch_key = key.clone();
        let fetch = async move { fetch_and_store(transport, entries, pending_table, fetch_key).await }
            .boxed()
            .shared();
        pending.insert(key, fetch.clone());
        fetch
    }
}

async fn fetch_and_store(
    transport: Arc<dyn TransactionTransport>,
    entries: Arc<Mutex<EntryMap>>,
    pending: Arc<Mutex<PendingMap>>,
    key: LookupKey,
) -> FetchOutcome {
    let endpoint = resolve_endpoint(key.cluster, key.endpoint_override.as_deref());
    logger::debug(
        LogTag::Cache,
        &format!(
            "FETCH {} via {}",
            format_signature_short(&key.signature),
            endpoint
        ),
    );

    let outcome = match transport.fetch_transaction(&key.signature, &endpoint).await {
        Ok(Some(raw)) => {
            let details = build_details(&key.signature, &raw);
            entries.lock().unwrap().insert(
                key.clone(),
                CachedDetails {
                    details: details.clone(),
                    fetched_at: Instant::now(),
                },
            );
            Ok(Some(details))
        }
        // Node has no record; may confirm later, so no negative caching
        Ok(None) => Ok(None),
        // Faults are not cached: the next request gets a fresh attempt
        Err(e) => Err(e),
    };

    // Completion removes the pending-table entry; every coalesced waiter
    // still observes the same outcome through the shared handle
    pending.lock().unwrap().remove(&key);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::testutil::{legacy_raw_tx, success_meta};
    use async_trait::async_trait;
    use solana_transaction_status::EncodedConfirmedTransactionWithStatusMeta;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type ScriptedResponse = Result<Option<EncodedConfirmedTransactionWithStatusMeta>, FetchError>;

    /// Counting transport double; pops scripted responses, defaulting to a
    /// fixed successful transaction when the script runs out
    struct MockTransport {
        calls: AtomicUsize,
        delay: Duration,
        script: Mutex<VecDeque<ScriptedResponse>>,
    }

    impl MockTransport {
        fn new(delay_ms: u64) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay: Duration::from_millis(delay_ms),
                script: Mutex::new(VecDeque::new()),
            }
        }

        fn scripted(delay_ms: u64, responses: Vec<ScriptedResponse>) -> Self {
            let transport = Self::new(delay_ms);
            *transport.script.lock().unwrap() = responses.into();
            transport
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TransactionTransport for MockTransport {
        async fn fetch_transaction(
            &self,
            _signature: &str,
            _endpoint: &str,
        ) -> ScriptedResponse {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            let scripted = self.script.lock().unwrap().pop_front();
            scripted.unwrap_or_else(|| {
                Ok(Some(legacy_raw_tx(
                    &["Fee", "Other"],
                    success_meta(5000, &[1000, 2000], &[995_000, 2000], &[]),
                )))
            })
        }
    }

    fn key(signature: &str) -> LookupKey {
        LookupKey::new(Cluster::MainnetBeta, signature, None)
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_transport_call() {
        let transport = Arc::new(MockTransport::new(50));
        let cache = DetailsCache::new(Arc::clone(&transport) as Arc<dyn TransactionTransport>);

        let k = key("SharedSig");
        let (a, b) = tokio::join!(cache.get(k.clone()), cache.get(k.clone()));

        assert!(matches!(a, Ok(Some(_))));
        assert_eq!(a, b);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_fresh_entry_served_without_transport_call() {
        let transport = Arc::new(MockTransport::new(0));
        let cache = DetailsCache::new(Arc::clone(&transport) as Arc<dyn TransactionTransport>);

        let k = key("CachedSig");
        let first = cache.get(k.clone()).await.unwrap().unwrap();
        let second = cache.get(k.clone()).await.unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.calls(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_triggers_refetch() {
        let transport = Arc::new(MockTransport::new(0));
        let cache = DetailsCache::with_staleness(
            Arc::clone(&transport) as Arc<dyn TransactionTransport>,
            Duration::ZERO,
        );

        let k = key("StaleSig");
        cache.get(k.clone()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.get(k.clone()).await.unwrap();

        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached_negatively() {
        let transport = Arc::new(MockTransport::scripted(0, vec![Ok(None)]));
        let cache = DetailsCache::new(Arc::clone(&transport) as Arc<dyn TransactionTransport>);

        let k = key("PendingSig");
        assert_eq!(cache.get(k.clone()).await, Ok(None));
        assert_eq!(cache.len(), 0);

        // Transaction confirmed in the meantime; retry must hit the node again
        let found = cache.get(k.clone()).await.unwrap();
        assert!(found.is_some());
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_fault_not_cached_next_request_retries() {
        let transport = Arc::new(MockTransport::scripted(
            0,
            vec![Err(FetchError::Transport("connection reset".to_string()))],
        ));
        let cache = DetailsCache::new(Arc::clone(&transport) as Arc<dyn TransactionTransport>);

        let k = key("FlakySig");
        let first = cache.get(k.clone()).await;
        assert_eq!(
            first,
            Err(FetchError::Transport("connection reset".to_string()))
        );

        let second = cache.get(k.clone()).await.unwrap();
        assert!(second.is_some());
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_coalesced_waiters_all_see_the_same_fault() {
        let transport = Arc::new(MockTransport::scripted(
            50,
            vec![Err(FetchError::Transport("timeout".to_string()))],
        ));
        let cache = DetailsCache::new(Arc::clone(&transport) as Arc<dyn TransactionTransport>);

        let k = key("TimeoutSig");
        let (a, b) = tokio::join!(cache.get(k.clone()), cache.get(k.clone()));

        assert_eq!(a, Err(FetchError::Transport("timeout".to_string())));
        assert_eq!(a, b);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_endpoint_override_is_a_distinct_key() {
        let transport = Arc::new(MockTransport::new(0));
        let cache = DetailsCache::new(Arc::clone(&transport) as Arc<dyn TransactionTransport>);

        let sig = "SameSigTwoEndpoints";
        cache
            .get(LookupKey::new(Cluster::MainnetBeta, sig, None))
            .await
            .unwrap();
        cache
            .get(LookupKey::new(
                Cluster::MainnetBeta,
                sig,
                Some("https://my-node.example.com"),
            ))
            .await
            .unwrap();

        assert_eq!(transport.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_blank_override_normalizes_to_none() {
        let k = LookupKey::new(Cluster::Devnet, "Sig", Some("   "));
        assert_eq!(k.endpoint_override, None);

        let k = LookupKey::new(Cluster::Devnet, "Sig", Some(" https://node "));
        assert_eq!(k.endpoint_override, Some("https://node".to_string()));
    }
}
