//! UI-side state of the map browsing view.

pub mod filter;
pub mod icons;
pub mod map_view;
pub mod marker;
pub mod overlay;
pub mod search;
pub mod selection;
pub mod timer;
pub mod viewport;
pub mod widget;

pub use filter::{CategoryFilter, FilterState};
pub use icons::{init_default_icons, DefaultIconAssets};
pub use map_view::MapView;
pub use marker::{icon_for, IconSize, MarkerColor, MarkerIcon, MarkerSpec};
pub use overlay::{transit_lines, TransitLine};
pub use search::search_places;
pub use selection::{SelectionController, SelectionState};
pub use viewport::{
    FitBoundsOptions, FlyToOptions, MapWidget, RecordingWidget, ViewportController, ViewportTarget,
};
pub use widget::AnimatedViewport;
