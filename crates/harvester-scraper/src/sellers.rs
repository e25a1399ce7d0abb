//! Seller resolution with a per-session cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures::stream::{self, StreamExt};
use harvester_core::SellerRecord;
use tokio::sync::OnceCell;

use crate::client::CatalogClient;
use crate::normalize::normalize_seller;
use crate::progress::ProgressSink;

type Slot = Arc<OnceCell<SellerRecord>>;

/// Seller records resolved during one harvest session, keyed by seller id.
///
/// Clones share the same map. Each id owns a [`OnceCell`], so concurrent
/// lookups of the same id wait on a single upstream request and then all
/// observe the same record. Placeholders are cached like any other record.
#[derive(Debug, Clone, Default)]
pub struct SellerCache {
    slots: Arc<Mutex<HashMap<u64, Slot>>>,
}

impl SellerCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached record for `seller_id`, if its lookup has completed.
    #[must_use]
    pub fn get(&self, seller_id: u64) -> Option<SellerRecord> {
        self.lock()
            .get(&seller_id)
            .and_then(|slot| slot.get().cloned())
    }

    /// Number of ids with a completed lookup.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, seller_id: u64) -> Slot {
        Arc::clone(self.lock().entry(seller_id).or_default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, Slot>> {
        // The map is only ever mutated by `entry().or_default()`, which
        // cannot leave it half-written, so a poisoned lock is still usable.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolves seller ids to [`SellerRecord`]s through a [`SellerCache`].
#[derive(Debug, Clone, Copy)]
pub struct SellerResolver<'a> {
    client: &'a CatalogClient,
    cache: &'a SellerCache,
}

impl<'a> SellerResolver<'a> {
    #[must_use]
    pub fn new(client: &'a CatalogClient, cache: &'a SellerCache) -> Self {
        Self { client, cache }
    }

    /// Returns the record for `seller_id`.
    ///
    /// Never fails: any fetch or decode error yields
    /// [`SellerRecord::placeholder`]. `progress` receives `update(1)` for
    /// every call, cache hits included.
    pub async fn resolve(&self, seller_id: u64, progress: &dyn ProgressSink) -> SellerRecord {
        let slot = self.cache.slot(seller_id);
        let record = slot
            .get_or_init(|| self.fetch_or_placeholder(seller_id))
            .await
            .clone();
        progress.update(1);
        record
    }

    /// Resolves every id in `seller_ids` with at most `concurrency` lookups
    /// in flight. The output is in input order.
    pub async fn resolve_many(
        &self,
        seller_ids: &[u64],
        concurrency: usize,
        progress: &dyn ProgressSink,
    ) -> Vec<SellerRecord> {
        stream::iter(seller_ids.iter().copied())
            .map(|seller_id| self.resolve(seller_id, progress))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    async fn fetch_or_placeholder(&self, seller_id: u64) -> SellerRecord {
        match self.client.fetch_seller(seller_id).await {
            Ok(raw) => {
                normalize_seller(&raw, seller_id, &self.client.endpoints().seller_page_url)
            }
            Err(e) => {
                tracing::warn!(seller_id, error = %e, "seller lookup failed; using placeholder");
                SellerRecord::placeholder(seller_id)
            }
        }
    }
}
