use crate::model::{NewPlace, Place, PlaceId, PlacePatch, SortKey};
use crate::store::PlaceStore;
use crate::{MapError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-process place store used by tests and the offline demo
#[derive(Debug, Default)]
pub struct MemoryPlaceStore {
    places: Mutex<Vec<Place>>,
    next_id: AtomicU64,
    list_calls: AtomicUsize,
    failing_lists: AtomicU32,
}

impl MemoryPlaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_places(places: Vec<Place>) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.places.lock() {
            *guard = places;
        }
        store
    }

    /// Number of `list` calls that reached the store
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Makes the next `count` list calls fail with a store error
    pub fn fail_next_lists(&self, count: u32) {
        self.failing_lists.store(count, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Place>>> {
        self.places
            .lock()
            .map_err(|_| MapError::Store("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PlaceStore for MemoryPlaceStore {
    async fn list(&self, sort: &SortKey) -> Result<Vec<Place>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let should_fail = self
            .failing_lists
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(MapError::Store("simulated list failure".to_string()));
        }

        let mut places = self.lock()?.clone();
        sort.sort(&mut places);
        Ok(places)
    }

    async fn update(&self, id: &PlaceId, patch: &PlacePatch) -> Result<Place> {
        let mut places = self.lock()?;
        let place = places
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| MapError::NotFound(id.to_string()))?;
        place.apply(patch);
        Ok(place.clone())
    }

    async fn create(&self, place: &NewPlace) -> Result<Place> {
        if !place.position().is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "{}, {}",
                place.latitude, place.longitude
            )));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = place.clone().into_place(PlaceId::new(format!("mem-{}", id)));
        self.lock()?.push(created.clone());
        Ok(created)
    }
}

#[cfg(all(test, feature = "tokio-runtime"))]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::model::Category;

    #[tokio::test]
    async fn test_create_then_list_sorted() {
        let store = MemoryPlaceStore::new();
        let mut first = NewPlace::new("Joe's", LatLng::new(40.73, -74.0), Category::Restaurant);
        first.date_visited = Some("2024-01-01".to_string());
        let mut second = NewPlace::new("Blue Bottle", LatLng::new(40.72, -73.99), Category::Cafe);
        second.date_visited = Some("2024-03-01".to_string());

        store.create(&first).await.unwrap();
        store.create(&second).await.unwrap();

        let places = store.list(&SortKey::parse("-date_visited")).await.unwrap();
        assert_eq!(places[0].name, "Blue Bottle");
        assert_eq!(places[1].name, "Joe's");
        assert_ne!(places[0].id, places[1].id);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryPlaceStore::new();
        let err = store
            .update(&PlaceId::new("missing"), &PlacePatch::favorite(true))
            .await
            .unwrap_err();
        assert!(matches!(err, MapError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_coordinates() {
        let store = MemoryPlaceStore::new();
        let bad = NewPlace::new("Nowhere", LatLng::new(120.0, 0.0), Category::Bar);
        assert!(matches!(
            store.create(&bad).await,
            Err(MapError::InvalidCoordinates(_))
        ));
    }
}
