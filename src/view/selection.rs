//! Selection and highlight state with deferred transitions
//!
//! At most one place is selected (its detail card is open) and at most one is
//! highlighted (its marker pulses). Search and add-place flows select their
//! place after a delay; only the most recent request may fire, and marker
//! clicks or closing the card cancel whatever is still pending.

use super::timer::DeferredSlot;
use crate::animation::Pulse;
use crate::core::config::TimingConfig;
use crate::model::{Place, PlaceId};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Idle,
    Highlighting(PlaceId),
    Selected(PlaceId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub place: Place,
    elapsed: Duration,
}

impl Highlight {
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    selected: Option<Place>,
    highlight: Option<Highlight>,
    pending: DeferredSlot<Place>,
    pulse: Pulse,
}

impl SelectionController {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            selected: None,
            highlight: None,
            pending: DeferredSlot::new(),
            pulse: Pulse::new(timing.pulse_count, timing.pulse_duration()),
        }
    }

    pub fn state(&self) -> SelectionState {
        if let Some(place) = &self.selected {
            SelectionState::Selected(place.id.clone())
        } else if let Some(highlight) = &self.highlight {
            SelectionState::Highlighting(highlight.place.id.clone())
        } else {
            SelectionState::Idle
        }
    }

    pub fn selected(&self) -> Option<&Place> {
        self.selected.as_ref()
    }

    pub fn highlighted(&self) -> Option<&Place> {
        self.highlight.as_ref().map(|h| &h.place)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn pending_place(&self) -> Option<&Place> {
        self.pending.peek()
    }

    /// Opens the detail card for `place`, or closes it for `None`
    ///
    /// Any pending deferred selection is cancelled and the highlight cleared.
    pub fn select(&mut self, place: Option<Place>) {
        if let Some(cancelled) = self.pending.cancel() {
            log::debug!("cancelled pending selection of {}", cancelled.id);
        }
        self.highlight = None;
        self.selected = place;
    }

    pub fn close(&mut self) {
        self.select(None);
    }

    /// Starts the pulse on `place`; the highlight clears itself once the pulse ends
    pub fn highlight(&mut self, place: Place) {
        self.highlight = Some(Highlight {
            place,
            elapsed: Duration::ZERO,
        });
    }

    /// Closes the card, pulses `place` and selects it after `delay`
    pub fn search_select(&mut self, place: Place, delay: Duration) {
        self.selected = None;
        self.highlight(place.clone());
        self.schedule(place, delay);
    }

    /// Selects `place` after `delay` without touching the current card
    pub fn schedule(&mut self, place: Place, delay: Duration) {
        log::debug!("selecting {} in {:?}", place.id, delay);
        if let Some(replaced) = self.pending.schedule(delay, place) {
            log::debug!("replaced pending selection of {}", replaced.id);
        }
    }

    /// Advances timers; returns the place selected by a deferred task, if one fired
    pub fn advance(&mut self, delta: Duration) -> Option<PlaceId> {
        if let Some(highlight) = self.highlight.as_mut() {
            highlight.elapsed += delta;
            if self.pulse.is_finished(highlight.elapsed) {
                self.highlight = None;
            }
        }

        let fired = self.pending.advance(delta)?;
        let id = fired.id.clone();
        self.highlight = None;
        self.selected = Some(fired);
        Some(id)
    }

    /// Current pulse scale of `id`'s marker, if it is highlighted
    pub fn pulse_scale(&self, id: &PlaceId) -> Option<f64> {
        self.highlight
            .as_ref()
            .filter(|h| &h.place.id == id)
            .map(|h| self.pulse.scale_at(h.elapsed))
    }

    pub fn is_pulsing(&self, id: &PlaceId) -> bool {
        self.pulse_scale(id).is_some()
    }

    /// Swaps held snapshots for their refetched versions
    pub fn refresh(&mut self, places: &[Place]) {
        let latest = |id: &PlaceId| places.iter().find(|p| &p.id == id).cloned();

        if let Some(fresh) = self.selected.as_ref().and_then(|p| latest(&p.id)) {
            self.selected = Some(fresh);
        }
        if let Some(highlight) = self.highlight.as_mut() {
            if let Some(fresh) = latest(&highlight.place.id) {
                highlight.place = fresh;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn place(id: &str) -> Place {
        Place {
            id: PlaceId::new(id),
            name: format!("place {}", id),
            latitude: 40.7,
            longitude: -74.0,
            category: Category::Cafe,
            is_favorite: false,
            date_visited: None,
            address: None,
            notes: None,
            rating: None,
        }
    }

    fn controller() -> SelectionController {
        SelectionController::new(&TimingConfig::default())
    }

    #[test]
    fn test_search_select_highlights_then_selects() {
        let mut selection = controller();
        selection.select(Some(place("old")));

        selection.search_select(place("p"), Duration::from_millis(1500));
        assert_eq!(selection.state(), SelectionState::Highlighting(PlaceId::new("p")));
        assert!(selection.selected().is_none());
        assert!(selection.is_pulsing(&PlaceId::new("p")));

        assert_eq!(selection.advance(Duration::from_millis(1499)), None);
        assert_eq!(selection.state(), SelectionState::Highlighting(PlaceId::new("p")));

        assert_eq!(selection.advance(Duration::from_millis(1)), Some(PlaceId::new("p")));
        assert_eq!(selection.state(), SelectionState::Selected(PlaceId::new("p")));
        assert!(selection.highlighted().is_none());
    }

    #[test]
    fn test_later_request_preempts_earlier() {
        let mut selection = controller();
        selection.search_select(place("a"), Duration::from_millis(1500));
        selection.advance(Duration::from_millis(1000));
        selection.search_select(place("b"), Duration::from_millis(1500));

        // a's original deadline passes without selecting it
        assert_eq!(selection.advance(Duration::from_millis(600)), None);
        assert_eq!(selection.state(), SelectionState::Highlighting(PlaceId::new("b")));

        assert_eq!(selection.advance(Duration::from_millis(900)), Some(PlaceId::new("b")));
        assert_eq!(selection.selected().map(|p| p.id.as_str()), Some("b"));
    }

    #[test]
    fn test_marker_click_cancels_pending() {
        let mut selection = controller();
        selection.search_select(place("a"), Duration::from_millis(1500));
        selection.select(Some(place("b")));

        assert!(!selection.has_pending());
        assert_eq!(selection.advance(Duration::from_secs(2)), None);
        assert_eq!(selection.state(), SelectionState::Selected(PlaceId::new("b")));
    }

    #[test]
    fn test_close_cancels_pending() {
        let mut selection = controller();
        selection.schedule(place("new"), Duration::from_millis(800));
        selection.close();

        assert_eq!(selection.advance(Duration::from_secs(1)), None);
        assert_eq!(selection.state(), SelectionState::Idle);
    }

    #[test]
    fn test_schedule_keeps_current_card_until_fired() {
        let mut selection = controller();
        selection.select(Some(place("old")));
        selection.schedule(place("new"), Duration::from_millis(800));

        assert_eq!(selection.advance(Duration::from_millis(799)), None);
        assert_eq!(selection.state(), SelectionState::Selected(PlaceId::new("old")));
        assert_eq!(selection.advance(Duration::from_millis(1)), Some(PlaceId::new("new")));
    }

    #[test]
    fn test_highlight_clears_after_pulse() {
        let mut selection = controller();
        selection.highlight(place("p"));

        selection.advance(Duration::from_millis(250));
        let scale = selection.pulse_scale(&PlaceId::new("p")).unwrap();
        assert!(scale > 1.0);
        assert_eq!(selection.pulse_scale(&PlaceId::new("q")), None);

        selection.advance(Duration::from_millis(1250));
        assert_eq!(selection.state(), SelectionState::Idle);
    }

    #[test]
    fn test_refresh_updates_selected_snapshot() {
        let mut selection = controller();
        selection.select(Some(place("p")));

        let mut updated = place("p");
        updated.is_favorite = true;
        selection.refresh(&[updated]);

        assert!(selection.selected().unwrap().is_favorite);
    }
}
