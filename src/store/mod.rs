//! Place persistence
//!
//! The view never owns place data. It reads through [`PlaceQuery`], a cache
//! keyed by a fixed key, and writes through [`PlaceStore`] implementations,
//! invalidating the cache after every confirmed mutation.

pub mod http;
pub mod memory;
pub mod query;

pub use http::HttpPlaceStore;
pub use memory::MemoryPlaceStore;
pub use query::PlaceQuery;

use crate::model::{NewPlace, Place, PlaceId, PlacePatch, SortKey};
use crate::Result;
use async_trait::async_trait;

/// Remote entity collection for places
#[async_trait]
pub trait PlaceStore: Send + Sync {
    /// All places in the order given by `sort`
    async fn list(&self, sort: &SortKey) -> Result<Vec<Place>>;

    /// Applies the present fields of `patch` and returns the stored place
    async fn update(&self, id: &PlaceId, patch: &PlacePatch) -> Result<Place>;

    /// Creates a place and returns it with its assigned id
    async fn create(&self, place: &NewPlace) -> Result<Place>;
}
