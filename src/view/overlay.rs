//! Fixed transit overlay lines drawn above the tiles.

use super::marker::MarkerColor;
use crate::core::geo::{LatLng, LatLngBounds};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitLine {
    pub name: &'static str,
    pub color: MarkerColor,
    /// Stroke width in pixels
    pub weight: f32,
    pub opacity: f32,
    pub path: &'static [[f64; 2]],
}

impl TransitLine {
    pub fn points(&self) -> Vec<LatLng> {
        self.path.iter().copied().map(LatLng::from).collect()
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.points().iter())
    }
}

/// Crosstown line along 14th Street into Williamsburg
const CROSSTOWN_PATH: &[[f64; 2]] = &[
    [40.7397, -74.0027],
    [40.7377, -73.9969],
    [40.7359, -73.9906],
    [40.7327, -73.9860],
    [40.7307, -73.9812],
    [40.7191, -73.9569],
    [40.7142, -73.9509],
];

/// Uptown-downtown line along Broadway
const BROADWAY_PATH: &[[f64; 2]] = &[
    [40.7681, -73.9819],
    [40.7593, -73.9845],
    [40.7549, -73.9870],
    [40.7497, -73.9877],
    [40.7411, -73.9897],
    [40.7359, -73.9906],
    [40.7282, -73.9941],
    [40.7243, -73.9978],
    [40.7193, -74.0016],
    [40.7132, -74.0061],
];

pub const TRANSIT_LINES: [TransitLine; 2] = [
    TransitLine {
        name: "Crosstown",
        color: MarkerColor::rgb(0xa7, 0xa9, 0xac),
        weight: 4.0,
        opacity: 0.8,
        path: CROSSTOWN_PATH,
    },
    TransitLine {
        name: "Broadway",
        color: MarkerColor::rgb(0xfc, 0xcc, 0x0a),
        weight: 4.0,
        opacity: 0.8,
        path: BROADWAY_PATH,
    },
];

pub fn transit_lines() -> &'static [TransitLine] {
    &TRANSIT_LINES
}
