pub mod cache;
pub mod grid;
pub mod loader;
pub mod retry;
pub mod source;

pub use cache::TileCache;
pub use grid::{visible_tiles, TilePlacement, TILE_SIZE};
pub use loader::TileLoader;
pub use retry::FailedTiles;
pub use source::{TemplateTileSource, TileCoord, TileSource};
