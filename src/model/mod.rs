pub mod place;

pub use place::{Category, NewPlace, Place, PlaceId, PlacePatch, SortKey};
