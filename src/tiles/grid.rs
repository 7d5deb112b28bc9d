use super::source::TileCoord;
use crate::core::geo::Point;
use crate::core::viewport::Viewport;

/// Pixel size of a tile at its native zoom
pub const TILE_SIZE: f64 = 256.0;

/// A tile and where it lands inside the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub coord: TileCoord,
    /// Top-left corner in container pixels
    pub min: Point,
    /// Edge length in container pixels; larger than 256 between zoom levels
    pub size: f64,
}

/// Tiles covering the viewport at the nearest lower integer zoom
pub fn visible_tiles(viewport: &Viewport, max_zoom: u8) -> Vec<TilePlacement> {
    let z = (viewport.zoom.floor().max(0.0) as u8).min(max_zoom);
    let tiles_per_axis = 1u32 << z;
    let size = TILE_SIZE * 2_f64.powf(viewport.zoom - z as f64);

    let origin = viewport.get_pixel_origin();
    let top_left = Point::new(
        origin.x - viewport.size.x / 2.0,
        origin.y - viewport.size.y / 2.0,
    );

    let last = tiles_per_axis as i64 - 1;
    let index = |pixel: f64| ((pixel / size).floor() as i64).clamp(0, last) as u32;
    let (min_x, max_x) = (index(top_left.x), index(top_left.x + viewport.size.x));
    let (min_y, max_y) = (index(top_left.y), index(top_left.y + viewport.size.y));

    let mut tiles = Vec::with_capacity(((max_x - min_x + 1) * (max_y - min_y + 1)) as usize);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            tiles.push(TilePlacement {
                coord: TileCoord::new(x, y, z),
                min: Point::new(x as f64 * size - top_left.x, y as f64 * size - top_left.y),
                size,
            });
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    #[test]
    fn test_world_at_zoom_zero_is_one_tile() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 0.0, Point::new(256.0, 256.0));
        let tiles = visible_tiles(&viewport, 18);

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].coord, TileCoord::new(0, 0, 0));
        assert!(tiles[0].min.x.abs() < 1e-9 && tiles[0].min.y.abs() < 1e-9);
        assert_eq!(tiles[0].size, 256.0);
    }

    #[test]
    fn test_tiles_cover_viewport() {
        let viewport = Viewport::new(LatLng::new(40.7128, -74.0060), 12.5, Point::new(800.0, 600.0));
        let tiles = visible_tiles(&viewport, 18);

        assert!(tiles.iter().all(|t| t.coord.z == 12));
        let min_x = tiles.iter().map(|t| t.min.x).fold(f64::INFINITY, f64::min);
        let min_y = tiles.iter().map(|t| t.min.y).fold(f64::INFINITY, f64::min);
        let max_x = tiles.iter().map(|t| t.min.x + t.size).fold(f64::NEG_INFINITY, f64::max);
        let max_y = tiles.iter().map(|t| t.min.y + t.size).fold(f64::NEG_INFINITY, f64::max);
        assert!(min_x <= 0.0 && min_y <= 0.0);
        assert!(max_x >= 800.0 && max_y >= 600.0);
    }

    #[test]
    fn test_zoom_is_capped_by_source() {
        let viewport = Viewport::new(LatLng::new(40.7, -74.0), 18.0, Point::new(400.0, 300.0));
        assert!(visible_tiles(&viewport, 17).iter().all(|t| t.coord.z == 17));
    }
}
