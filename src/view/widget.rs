//! Headless animated map widget
//!
//! Implements [`MapWidget`] over a Web Mercator [`Viewport`], running fly-to
//! and fit-bounds requests as transitions. Each completed zoom change is
//! reported once from [`AnimatedViewport::advance`] or the interaction methods.

use super::viewport::{FitBoundsOptions, FlyToOptions, MapWidget};
use crate::animation::{Transition, TransitionManager, TransitionType};
use crate::core::config::ZoomConfig;
use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::core::viewport::Viewport;
use std::time::Duration;

/// Duration of the fit-bounds pan/zoom
pub const FIT_BOUNDS_DURATION: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct AnimatedViewport {
    viewport: Viewport,
    transitions: TransitionManager,
}

impl AnimatedViewport {
    pub fn new(config: &ZoomConfig, size: Point) -> Self {
        let mut viewport = Viewport::new(config.default_center(), config.default_zoom, size);
        viewport.set_zoom_limits(config.min_zoom, config.max_zoom);
        Self {
            viewport,
            transitions: TransitionManager::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn center(&self) -> LatLng {
        self.viewport.center
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    pub fn is_animating(&self) -> bool {
        self.transitions.has_active_transition()
    }

    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
    }

    /// Advances the running transition; returns the final zoom when it completes
    pub fn advance(&mut self, delta: Duration) -> Option<f64> {
        let step = self.transitions.update(delta)?;
        self.viewport = step.viewport;
        if step.completed {
            log::debug!("transition finished at zoom {:.2}", self.viewport.zoom);
            Some(self.viewport.zoom)
        } else {
            None
        }
    }

    /// User drag; cancels any running animation
    pub fn pan(&mut self, delta: Point) {
        self.transitions.stop_all();
        self.viewport.pan(delta);
    }

    /// User zoom around `focus`; returns the new zoom when it changed
    pub fn zoom_by(&mut self, delta: f64, focus: Option<Point>) -> Option<f64> {
        self.transitions.stop_all();
        let before = self.viewport.zoom;
        self.viewport.zoom_to(before + delta, focus);
        if (self.viewport.zoom - before).abs() > f64::EPSILON {
            Some(self.viewport.zoom)
        } else {
            None
        }
    }

    fn start(&mut self, transition_type: TransitionType, duration: Duration) {
        let transition = Transition::new(transition_type, self.viewport.clone(), duration);
        self.transitions.start_transition(transition);
    }
}

impl MapWidget for AnimatedViewport {
    fn fly_to(&mut self, center: LatLng, zoom: f64, options: FlyToOptions) {
        self.start(
            TransitionType::FlyTo {
                target_center: center,
                target_zoom: zoom,
            },
            options.duration,
        );
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds, options: FitBoundsOptions) {
        self.start(
            TransitionType::FitBounds {
                bounds: bounds.clone(),
                padding: options.padding,
            },
            FIT_BOUNDS_DURATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> AnimatedViewport {
        AnimatedViewport::new(&ZoomConfig::default(), Point::new(800.0, 600.0))
    }

    #[test]
    fn test_fly_to_reports_zoom_end_once() {
        let mut widget = widget();
        let target = LatLng::new(40.7580, -73.9855);
        widget.fly_to(
            target,
            16.0,
            FlyToOptions {
                duration: Duration::from_millis(1500),
            },
        );

        assert!(widget.is_animating());
        assert_eq!(widget.advance(Duration::from_millis(750)), None);
        assert_eq!(widget.advance(Duration::from_millis(750)), Some(16.0));
        assert_eq!(widget.advance(Duration::from_millis(16)), None);

        assert!(!widget.is_animating());
        assert!((widget.center().lat - target.lat).abs() < 1e-6);
        assert!((widget.center().lng - target.lng).abs() < 1e-6);
    }

    #[test]
    fn test_new_request_interrupts_running_flight() {
        let mut widget = widget();
        let options = FlyToOptions {
            duration: Duration::from_millis(1500),
        };
        widget.fly_to(LatLng::new(40.0, -74.0), 10.0, options);
        widget.advance(Duration::from_millis(500));
        widget.fly_to(LatLng::new(41.0, -73.0), 14.0, options);

        let mut last = None;
        for _ in 0..20 {
            if let Some(zoom) = widget.advance(Duration::from_millis(100)) {
                last = Some(zoom);
            }
        }
        assert_eq!(last, Some(14.0));
    }

    #[test]
    fn test_fit_bounds_shows_every_corner() {
        let mut widget = widget();
        let bounds = LatLngBounds::from_coords(40.70, -74.02, 40.80, -73.93);
        widget.fit_bounds(&bounds, FitBoundsOptions { padding: 50.0 });

        assert!(widget.advance(FIT_BOUNDS_DURATION).is_some());
        let visible = widget.viewport().bounds();
        assert!(visible.contains(&bounds.south_west));
        assert!(visible.contains(&bounds.north_east));
    }

    #[test]
    fn test_user_zoom_cancels_animation() {
        let mut widget = widget();
        widget.fly_to(
            LatLng::new(40.0, -74.0),
            16.0,
            FlyToOptions {
                duration: Duration::from_secs(1),
            },
        );
        assert_eq!(widget.zoom_by(1.0, None), Some(13.0));
        assert!(!widget.is_animating());
        assert_eq!(widget.advance(Duration::from_secs(1)), None);
    }
}
