use crate::animation::tweening::{EasingFunction, Tweenable};
use crate::core::{
    geo::{LatLng, LatLngBounds},
    viewport::Viewport,
};
use std::time::Duration;

/// Types of map transitions
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionType {
    /// Smooth fly-to animation: zooms out a little mid-flight, then back in
    FlyTo {
        target_center: LatLng,
        target_zoom: f64,
    },
    /// Fit bounds with animation
    FitBounds { bounds: LatLngBounds, padding: f64 },
}

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

/// A viewport transition animation
#[derive(Debug, Clone)]
pub struct Transition {
    pub transition_type: TransitionType,
    pub duration: Duration,
    pub easing: EasingFunction,
    pub state: TransitionState,
    elapsed: Duration,
    /// Deepest zoom-out reached mid-flight
    flight_zoom: f64,
    pub start_viewport: Viewport,
    pub target_viewport: Viewport,
    pub current_viewport: Viewport,
}

impl Transition {
    pub fn new(transition_type: TransitionType, current_viewport: Viewport, duration: Duration) -> Self {
        let mut target_viewport = current_viewport.clone();
        match &transition_type {
            TransitionType::FlyTo {
                target_center,
                target_zoom,
            } => {
                target_viewport.set_zoom(*target_zoom);
                target_viewport.set_center(*target_center);
            }
            TransitionType::FitBounds { bounds, padding } => {
                target_viewport.fit_bounds(bounds, *padding);
            }
        }

        let flight_zoom = Self::flight_zoom(&current_viewport, &target_viewport);

        Self {
            transition_type,
            duration,
            easing: EasingFunction::EaseInOutCubic,
            state: TransitionState::NotStarted,
            elapsed: Duration::ZERO,
            flight_zoom,
            start_viewport: current_viewport.clone(),
            target_viewport,
            current_viewport,
        }
    }

    fn flight_zoom(start: &Viewport, target: &Viewport) -> f64 {
        let distance_km = start.center.distance_to(&target.center) / 1000.0;
        let dip = if distance_km < 1.0 {
            0.0
        } else {
            distance_km.log2().clamp(0.0, 4.0)
        };
        (start.zoom.min(target.zoom) - dip).max(start.min_zoom)
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn start(&mut self) {
        if self.state == TransitionState::NotStarted {
            self.state = TransitionState::Running;
            self.elapsed = Duration::ZERO;
        }
    }

    pub fn stop(&mut self) {
        self.state = TransitionState::Cancelled;
    }

    /// Advances the transition; returns true while it produced a new viewport
    pub fn update(&mut self, delta: Duration) -> bool {
        match self.state {
            TransitionState::NotStarted => {
                self.start();
                self.update(delta)
            }
            TransitionState::Running => {
                self.elapsed += delta;
                let progress = self.progress();
                let eased = self.easing.apply(progress);

                self.update_viewport(progress, eased);

                if progress >= 1.0 {
                    self.complete();
                }
                true
            }
            _ => false,
        }
    }

    fn update_viewport(&mut self, progress: f64, eased: f64) {
        let center = self
            .start_viewport
            .center
            .lerp(&self.target_viewport.center, eased);

        let zoom = match self.transition_type {
            TransitionType::FlyTo { .. } => {
                // parabolic arc through the flight zoom
                let start_zoom = self.start_viewport.zoom;
                let target_zoom = self.target_viewport.zoom;
                if progress < 0.5 {
                    let t = progress * 2.0;
                    start_zoom - (start_zoom - self.flight_zoom) * (2.0 * t - t * t)
                } else {
                    let t = (progress - 0.5) * 2.0;
                    self.flight_zoom + (target_zoom - self.flight_zoom) * (t * t)
                }
            }
            TransitionType::FitBounds { .. } => self
                .start_viewport
                .zoom
                .lerp(&self.target_viewport.zoom, eased),
        };

        self.current_viewport.set_zoom(zoom);
        self.current_viewport.set_center(center);
    }

    fn complete(&mut self) {
        self.state = TransitionState::Completed;
        self.current_viewport = self.target_viewport.clone();
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Completed | TransitionState::Cancelled
        )
    }

    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }
}

/// Outcome of advancing the transition manager by one frame
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionStep {
    pub viewport: Viewport,
    /// The running transition reached its target on this step
    pub completed: bool,
}

/// Runs at most one viewport transition; a new one interrupts the current one
#[derive(Debug, Default)]
pub struct TransitionManager {
    current_transition: Option<Transition>,
}

impl TransitionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_transition(&mut self, mut transition: Transition) {
        if let Some(ref mut current) = self.current_transition {
            log::debug!("interrupting {:?}", current.transition_type);
            current.stop();
        }
        transition.start();
        self.current_transition = Some(transition);
    }

    pub fn update(&mut self, delta: Duration) -> Option<TransitionStep> {
        let transition = self.current_transition.as_mut()?;
        if !transition.update(delta) {
            self.current_transition = None;
            return None;
        }

        let step = TransitionStep {
            viewport: transition.current_viewport.clone(),
            completed: transition.state == TransitionState::Completed,
        };
        if transition.is_finished() {
            self.current_transition = None;
        }
        Some(step)
    }

    pub fn stop_all(&mut self) {
        if let Some(mut transition) = self.current_transition.take() {
            transition.stop();
        }
    }

    pub fn has_active_transition(&self) -> bool {
        self.current_transition
            .as_ref()
            .map(|t| !t.is_finished())
            .unwrap_or(false)
    }

    pub fn current_transition(&self) -> Option<&Transition> {
        self.current_transition.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(40.7128, -74.0060), 12.0, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_fly_to_reaches_target() {
        let target = LatLng::new(40.7580, -73.9855);
        let mut manager = TransitionManager::new();
        manager.start_transition(Transition::new(
            TransitionType::FlyTo {
                target_center: target,
                target_zoom: 16.0,
            },
            viewport(),
            Duration::from_millis(1500),
        ));

        let mid = manager.update(Duration::from_millis(750)).unwrap();
        assert!(!mid.completed);
        assert!(mid.viewport.zoom <= 16.0);

        let end = manager.update(Duration::from_millis(750)).unwrap();
        assert!(end.completed);
        assert_eq!(end.viewport.zoom, 16.0);
        assert!((end.viewport.center.lat - target.lat).abs() < 1e-9);
        assert!(!manager.has_active_transition());
        assert!(manager.update(Duration::from_millis(16)).is_none());
    }

    #[test]
    fn test_zero_duration_completes_on_first_step() {
        let mut manager = TransitionManager::new();
        manager.start_transition(Transition::new(
            TransitionType::FlyTo {
                target_center: LatLng::new(51.5, -0.12),
                target_zoom: 15.0,
            },
            viewport(),
            Duration::ZERO,
        ));

        let step = manager.update(Duration::ZERO).unwrap();
        assert!(step.completed);
        assert_eq!(step.viewport.zoom, 15.0);
    }

    #[test]
    fn test_new_transition_interrupts_current() {
        let mut manager = TransitionManager::new();
        let far = LatLng::new(34.05, -118.24);
        manager.start_transition(Transition::new(
            TransitionType::FlyTo {
                target_center: far,
                target_zoom: 10.0,
            },
            viewport(),
            Duration::from_secs(2),
        ));
        manager.update(Duration::from_millis(100));

        let bounds = LatLngBounds::from_coords(40.70, -74.02, 40.80, -73.93);
        manager.start_transition(Transition::new(
            TransitionType::FitBounds {
                bounds: bounds.clone(),
                padding: 50.0,
            },
            viewport(),
            Duration::from_millis(200),
        ));

        let step = manager.update(Duration::from_millis(200)).unwrap();
        assert!(step.completed);
        assert_eq!(step.viewport.center, bounds.center());
    }
}
