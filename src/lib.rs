//! # placemap
//!
//! Map-browsing view for a personal places app: category and favorite
//! filtering, search with fly-to and marker pulse, an add-place flow, a
//! detail card with favorite toggling and two fixed transit overlays.
//!
//! The view state in [`view`] is plain synchronous Rust driven by explicit
//! frame time, so every flow can be exercised without a window. Store round
//! trips run on an async runtime behind [`background::StoreWorker`], and the
//! optional [`ui`] module renders everything with egui.

pub mod animation;
pub mod background;
pub mod core;
pub mod model;
pub mod prelude;
pub mod runtime;
pub mod store;
pub mod tiles;
#[cfg(feature = "egui")]
pub mod ui;
pub mod view;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MapViewOptions, MapViewProfile},
    geo::{LatLng, LatLngBounds, Point},
    viewport::Viewport,
};

pub use model::{Category, NewPlace, Place, PlaceId, PlacePatch, SortKey};

pub use store::{HttpPlaceStore, MemoryPlaceStore, PlaceQuery, PlaceStore};

pub use view::{MapView, MapWidget};

pub use background::{StoreCommand, StoreEvent, StoreWorker};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Place not found: {0}")]
    NotFound(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Tile error: {0}")]
    Tile(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Error type alias for convenience
pub type Error = MapError;
