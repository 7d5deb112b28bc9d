//! Viewport controller
//!
//! Holds the desired center/zoom target and drives the rendering layer's map
//! widget toward it. The widget is reached only through the [`MapWidget`]
//! capability; the controller never touches a concrete map object.

use crate::core::config::{TimingConfig, ZoomConfig};
use crate::core::geo::{LatLng, LatLngBounds};
use crate::model::Place;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyToOptions {
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBoundsOptions {
    /// Pixel margin kept free around the box
    pub padding: f64,
}

/// Imperative operations the rendering layer exposes to the view
pub trait MapWidget {
    fn fly_to(&mut self, center: LatLng, zoom: f64, options: FlyToOptions);

    fn fit_bounds(&mut self, bounds: &LatLngBounds, options: FitBoundsOptions);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTarget {
    pub center: LatLng,
    pub zoom: f64,
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    target: Option<ViewportTarget>,
    /// Bumped on every `set_target`, even when the value repeats
    revision: u64,
    applied_revision: u64,
    current_zoom: f64,
    fly_duration: Duration,
    fit_padding: f64,
}

impl ViewportController {
    pub fn new(zoom: &ZoomConfig, timing: &TimingConfig) -> Self {
        Self {
            target: None,
            revision: 0,
            applied_revision: 0,
            current_zoom: zoom.default_zoom,
            fly_duration: timing.fly_to_duration(),
            fit_padding: zoom.fit_bounds_padding,
        }
    }

    /// Sets the target; the widget flies there on the next `sync`
    pub fn set_target(&mut self, center: LatLng, zoom: f64) {
        log::debug!("viewport target -> ({}, {}) @ {}", center.lat, center.lng, zoom);
        self.target = Some(ViewportTarget { center, zoom });
        self.revision += 1;
    }

    /// The last target set; it is never cleared, only overwritten
    pub fn target(&self) -> Option<ViewportTarget> {
        self.target
    }

    pub fn has_pending_target(&self) -> bool {
        self.revision != self.applied_revision
    }

    /// Hands a changed target to the widget exactly once
    pub fn sync(&mut self, widget: &mut dyn MapWidget) -> bool {
        if !self.has_pending_target() {
            return false;
        }
        self.applied_revision = self.revision;
        match self.target {
            Some(target) => {
                widget.fly_to(
                    target.center,
                    target.zoom,
                    FlyToOptions {
                        duration: self.fly_duration,
                    },
                );
                true
            }
            None => false,
        }
    }

    /// Zoom-finished event from the widget
    pub fn on_zoom_end(&mut self, zoom: f64) {
        self.current_zoom = zoom;
    }

    pub fn current_zoom(&self) -> f64 {
        self.current_zoom
    }

    /// Fits every given place on screen; does nothing for an empty list
    pub fn recenter_to_fit_all(&self, places: &[&Place], widget: &mut dyn MapWidget) -> bool {
        let positions: Vec<LatLng> = places.iter().map(|p| p.position()).collect();
        match LatLngBounds::from_points(positions.iter()) {
            Some(bounds) => {
                widget.fit_bounds(
                    &bounds,
                    FitBoundsOptions {
                        padding: self.fit_padding,
                    },
                );
                true
            }
            None => {
                log::debug!("recenter skipped: no visible places");
                false
            }
        }
    }
}

/// Test double that records every widget call
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingWidget {
    pub fly_to_calls: Vec<(LatLng, f64, FlyToOptions)>,
    pub fit_bounds_calls: Vec<(LatLngBounds, FitBoundsOptions)>,
}

impl MapWidget for RecordingWidget {
    fn fly_to(&mut self, center: LatLng, zoom: f64, options: FlyToOptions) {
        self.fly_to_calls.push((center, zoom, options));
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds, options: FitBoundsOptions) {
        self.fit_bounds_calls.push((bounds.clone(), options));
    }
}
