//! The map browsing view
//!
//! `MapView` owns the UI-side state (filter, search text, viewport target,
//! selection) over a read-only snapshot of the cached place list. It never
//! edits places itself: favorite toggles come back out as patches for the
//! store, and the refetched list arrives through [`MapView::set_places`].

use super::filter::FilterState;
use super::icons::{init_default_icons, DefaultIconAssets};
use super::marker::{build_markers, MarkerSpec};
use super::overlay::{transit_lines, TransitLine};
use super::search::search_places;
use super::selection::{SelectionController, SelectionState};
use super::viewport::{MapWidget, ViewportController, ViewportTarget};
use crate::core::config::MapViewOptions;
use crate::model::{Place, PlaceId, PlacePatch};
use fxhash::FxHashMap;
use std::sync::Arc;
use std::time::Duration;

pub struct MapView {
    options: MapViewOptions,
    places: Arc<Vec<Place>>,
    index: FxHashMap<PlaceId, usize>,
    pub filter: FilterState,
    pub search_query: String,
    viewport: ViewportController,
    selection: SelectionController,
    icons: &'static DefaultIconAssets,
}

impl MapView {
    pub fn new(options: MapViewOptions) -> Self {
        let viewport = ViewportController::new(&options.zoom, &options.timing);
        let selection = SelectionController::new(&options.timing);
        Self {
            options,
            places: Arc::new(Vec::new()),
            index: FxHashMap::default(),
            filter: FilterState::default(),
            search_query: String::new(),
            viewport,
            selection,
            icons: init_default_icons(),
        }
    }

    pub fn options(&self) -> &MapViewOptions {
        &self.options
    }

    pub fn icons(&self) -> &'static DefaultIconAssets {
        self.icons
    }

    /// Replaces the cached snapshot
    pub fn set_places(&mut self, places: Arc<Vec<Place>>) {
        log::debug!("place snapshot updated: {} places", places.len());
        self.index = places
            .iter()
            .enumerate()
            .map(|(i, place)| (place.id.clone(), i))
            .collect();
        self.selection.refresh(&places);
        self.places = places;
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn place(&self, id: &PlaceId) -> Option<&Place> {
        self.index.get(id).and_then(|&i| self.places.get(i))
    }

    pub fn visible_places(&self) -> Vec<&Place> {
        self.filter.visible_places(&self.places)
    }

    /// Search results for the current query, over every cached place
    pub fn search_results(&self) -> Vec<&Place> {
        search_places(&self.search_query, &self.places)
    }

    pub fn markers(&self) -> Vec<MarkerSpec> {
        build_markers(
            &self.visible_places(),
            self.viewport.current_zoom(),
            self.options.zoom.icon_zoom_threshold,
            &self.selection,
        )
    }

    pub fn overlays(&self) -> &'static [TransitLine] {
        transit_lines()
    }

    /// Flies to `place`, pulses its marker, then opens its card
    pub fn on_search_select(&mut self, place: &Place) {
        log::debug!("search selected {}", place.id);
        self.viewport
            .set_target(place.position(), self.options.zoom.close_zoom);
        self.selection
            .search_select(place.clone(), self.options.timing.search_select_delay());
        self.search_query.clear();
    }

    /// Opens the card of a clicked marker; false when the id is not cached
    pub fn on_marker_click(&mut self, id: &PlaceId) -> bool {
        match self.place(id).cloned() {
            Some(place) => {
                self.selection.select(Some(place));
                true
            }
            None => {
                log::warn!("marker click on unknown place {}", id);
                false
            }
        }
    }

    pub fn close_detail(&mut self) {
        self.selection.close();
    }

    /// Flies to a newly created place and opens its card after a short delay
    pub fn on_add_place_success(&mut self, place: Place) {
        log::debug!("place {} created", place.id);
        self.viewport
            .set_target(place.position(), self.options.zoom.add_place_zoom);
        self.selection
            .schedule(place, self.options.timing.add_place_select_delay());
    }

    /// Patch flipping the favorite flag of `id`; the cached place is left untouched
    pub fn toggle_favorite(&self, id: &PlaceId) -> Option<(PlaceId, PlacePatch)> {
        let current = self
            .place(id)
            .or_else(|| self.selection.selected().filter(|p| &p.id == id))?;
        Some((id.clone(), PlacePatch::favorite(!current.is_favorite)))
    }

    /// Fits every visible place on screen
    pub fn recenter(&self, widget: &mut dyn MapWidget) -> bool {
        self.viewport
            .recenter_to_fit_all(&self.visible_places(), widget)
    }

    /// Hands a newly set viewport target to the widget
    pub fn sync_viewport(&mut self, widget: &mut dyn MapWidget) -> bool {
        self.viewport.sync(widget)
    }

    pub fn on_zoom_end(&mut self, zoom: f64) {
        self.viewport.on_zoom_end(zoom);
    }

    pub fn current_zoom(&self) -> f64 {
        self.viewport.current_zoom()
    }

    pub fn viewport_target(&self) -> Option<ViewportTarget> {
        self.viewport.target()
    }

    /// Drives pulse and deferred selections; returns a place selected on this step
    pub fn advance(&mut self, delta: Duration) -> Option<PlaceId> {
        let fired = self.selection.advance(delta)?;
        self.selection.refresh(&self.places);
        Some(fired)
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn selected(&self) -> Option<&Place> {
        self.selection.selected()
    }

    pub fn highlighted(&self) -> Option<&Place> {
        self.selection.highlighted()
    }

    pub fn has_pending_selection(&self) -> bool {
        self.selection.has_pending()
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(MapViewOptions::default())
    }
}
