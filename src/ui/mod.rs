pub mod canvas;
pub mod panels;
pub mod style;

pub use canvas::{CanvasOutput, MapCanvas};
pub use panels::{detail_card, filter_bar, search_box, AddPlaceForm, PanelAction};
pub use style::{AttributionStyle, MapStyle, MarkerStyle};
