//! Marker pulse: a scale oscillation repeated a fixed number of times.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub count: u32,
    pub duration: Duration,
    /// Peak scale reached in the middle of each pulse
    pub peak_scale: f64,
}

impl Pulse {
    pub fn new(count: u32, duration: Duration) -> Self {
        Self {
            count,
            duration,
            peak_scale: 1.5,
        }
    }

    /// Scale factor at `elapsed`; 1.0 outside the animation
    pub fn scale_at(&self, elapsed: Duration) -> f64 {
        if self.count == 0 || self.duration.is_zero() || elapsed >= self.duration {
            return 1.0;
        }
        let cycles = elapsed.as_secs_f64() / self.duration.as_secs_f64() * self.count as f64;
        let phase = cycles.fract();
        let wave = (phase * std::f64::consts::PI).sin();
        1.0 + (self.peak_scale - 1.0) * wave
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_peaks_once_per_cycle() {
        let pulse = Pulse::new(3, Duration::from_millis(1500));

        assert_eq!(pulse.scale_at(Duration::ZERO), 1.0);
        for peak_ms in [250, 750, 1250] {
            let scale = pulse.scale_at(Duration::from_millis(peak_ms));
            assert!((scale - 1.5).abs() < 1e-9, "peak at {}ms was {}", peak_ms, scale);
        }
        assert_eq!(pulse.scale_at(Duration::from_millis(1500)), 1.0);
        assert!(pulse.is_finished(Duration::from_millis(1500)));
    }

    #[test]
    fn test_disabled_pulse_never_scales() {
        let pulse = Pulse::new(0, Duration::from_millis(1500));
        assert_eq!(pulse.scale_at(Duration::from_millis(250)), 1.0);
    }
}
