//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits
//! so that users can import everything they need with a single use statement.

pub use crate::core::{
    config::{MapViewOptions, MapViewProfile, StoreConfig, TileConfig, TimingConfig, ZoomConfig},
    geo::{LatLng, LatLngBounds, Point},
    viewport::Viewport,
};

pub use crate::model::{Category, NewPlace, Place, PlaceId, PlacePatch, SortKey};

pub use crate::store::{HttpPlaceStore, MemoryPlaceStore, PlaceQuery, PlaceStore};

pub use crate::background::{StoreCommand, StoreEvent, StoreWorker};

pub use crate::view::{
    CategoryFilter, FilterState, MapView, MapWidget, MarkerSpec, SelectionState, TransitLine,
};

pub use crate::tiles::{TemplateTileSource, TileCache, TileCoord, TileLoader, TileSource};

#[cfg(feature = "egui")]
pub use crate::ui::{AddPlaceForm, CanvasOutput, MapCanvas, MapStyle, PanelAction};

pub use crate::{Error as MapError, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
