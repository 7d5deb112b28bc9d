//! View-wide constants: animation timings, zoom levels and marker geometry.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

use std::time::Duration;

/// Duration of the smooth fly-to transition.
pub const FLY_TO_DURATION: Duration = Duration::from_millis(1500);

/// Delay between a search selection and the detail card opening.
pub const SEARCH_SELECT_DELAY: Duration = Duration::from_millis(1500);

/// Delay between a successful add-place and the new place being selected.
pub const ADD_PLACE_SELECT_DELAY: Duration = Duration::from_millis(800);

/// Number of pulses a highlighted marker plays.
pub const PULSE_COUNT: u32 = 3;

/// Total duration of the pulse animation.
pub const PULSE_DURATION: Duration = Duration::from_millis(1500);

/// Zoom used when flying to a single search result.
pub const CLOSE_ZOOM: f64 = 16.0;

/// Zoom used when recentering on a freshly added place.
pub const ADD_PLACE_ZOOM: f64 = 15.0;

/// Markers switch from the small to the large icon at this zoom.
pub const ICON_ZOOM_THRESHOLD: f64 = 13.0;

/// Pixel margin kept around the box when fitting all places.
pub const FIT_BOUNDS_PADDING: f64 = 50.0;

/// Initial map center (New York City).
pub const DEFAULT_CENTER: [f64; 2] = [40.7128, -74.0060];

/// Initial map zoom.
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Marker icon size below the zoom threshold.
pub const MARKER_ICON_SIZE_SMALL: (u32, u32) = (20, 33);

/// Marker icon size at or above the zoom threshold (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Retina (2×) marker icon size.
pub const MARKER_ICON_SIZE_2X: (u32, u32) = (41, 65);

/// Cache key shared by every reader of the place list.
pub const PLACES_QUERY_KEY: &str = "places";

/// Canonical list order: most recently visited first.
pub const PLACES_SORT: &str = "-date_visited";

/// Maximum number of search results offered.
pub const MAX_SEARCH_RESULTS: usize = 8;
