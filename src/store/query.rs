use crate::core::{config::StoreConfig, constants};
use crate::model::{NewPlace, Place, PlaceId, PlacePatch, SortKey};
use crate::runtime::async_utils::async_delay;
use crate::store::PlaceStore;
use crate::Result;
use futures::lock::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct CacheEntry {
    places: Arc<Vec<Place>>,
    /// Invalidation generation the fetch started in
    generation: u64,
}

/// Cached place list under one fixed key, shared by every reader
///
/// `list` serves the cached entry while it is current; otherwise it fetches
/// (with retries) while holding the entry lock, so concurrent callers wait for
/// the same fetch instead of issuing their own. Mutations go straight to the
/// store and invalidate the key once confirmed; nothing is patched locally.
pub struct PlaceQuery {
    store: Arc<dyn PlaceStore>,
    key: &'static str,
    sort: SortKey,
    retry: StoreConfig,
    entry: Mutex<Option<CacheEntry>>,
    generation: AtomicU64,
    fetching: AtomicBool,
}

impl PlaceQuery {
    pub fn new(store: Arc<dyn PlaceStore>, retry: StoreConfig) -> Self {
        Self {
            store,
            key: constants::PLACES_QUERY_KEY,
            sort: SortKey::parse(constants::PLACES_SORT),
            retry,
            entry: Mutex::new(None),
            generation: AtomicU64::new(0),
            fetching: AtomicBool::new(false),
        }
    }

    pub fn key(&self) -> &str {
        self.key
    }

    /// True while a fetch is in flight
    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::SeqCst)
    }

    /// Places ordered by `date_visited`, most recent first
    pub async fn list(&self) -> Result<Arc<Vec<Place>>> {
        let mut entry = self.entry.lock().await;
        let generation = self.generation.load(Ordering::SeqCst);

        if let Some(cached) = entry.as_ref() {
            if cached.generation == generation {
                log::debug!("query '{}' served from cache", self.key);
                return Ok(cached.places.clone());
            }
        }

        self.fetching.store(true, Ordering::SeqCst);
        let fetched = self.fetch_with_retry().await;
        self.fetching.store(false, Ordering::SeqCst);

        let places = Arc::new(fetched?);
        // an invalidation during the fetch leaves the entry stale so the next read refetches
        *entry = Some(CacheEntry {
            places: places.clone(),
            generation,
        });
        Ok(places)
    }

    /// Marks the cached entry stale; the next `list` refetches
    pub fn invalidate(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("query '{}' invalidated (generation {})", self.key, generation);
    }

    /// Remote partial update followed by invalidation
    pub async fn update(&self, id: &PlaceId, patch: &PlacePatch) -> Result<Place> {
        let place = self.store.update(id, patch).await?;
        self.invalidate();
        Ok(place)
    }

    /// Remote creation followed by invalidation
    pub async fn create(&self, place: &NewPlace) -> Result<Place> {
        let created = self.store.create(place).await?;
        self.invalidate();
        Ok(created)
    }

    async fn fetch_with_retry(&self) -> Result<Vec<Place>> {
        let mut attempt = 0;
        loop {
            match self.store.list(&self.sort).await {
                Ok(places) => return Ok(places),
                Err(e) if attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.retry_delay(attempt);
                    log::warn!(
                        "query '{}' failed ({}), retry {}/{} in {:?}",
                        self.key,
                        e,
                        attempt,
                        self.retry.max_retries,
                        delay
                    );
                    async_delay(delay).await;
                }
                Err(e) => {
                    log::warn!("query '{}' failed after {} retries: {}", self.key, attempt, e);
                    return Err(e);
                }
            }
        }
    }
}
