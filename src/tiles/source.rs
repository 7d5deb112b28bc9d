use crate::core::config::TileConfig;
use std::fmt;

/// Slippy-map tile address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    fn url(&self, coord: TileCoord) -> String;

    /// Credit line the map must display
    fn attribution(&self) -> &str;
}

/// Tile source driven by a `{s}/{z}/{x}/{y}` URL template
#[derive(Debug, Clone)]
pub struct TemplateTileSource {
    url_template: String,
    subdomains: Vec<String>,
    attribution: String,
}

impl TemplateTileSource {
    pub fn new(config: &TileConfig) -> Self {
        Self {
            url_template: config.url_template.clone(),
            subdomains: config.subdomains.clone(),
            attribution: config.attribution.clone(),
        }
    }

    /// Default OpenStreetMap raster tiles
    pub fn openstreetmap() -> Self {
        Self::new(&TileConfig::default())
    }
}

impl Default for TemplateTileSource {
    fn default() -> Self {
        Self::openstreetmap()
    }
}

impl TileSource for TemplateTileSource {
    fn url(&self, coord: TileCoord) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let idx = ((coord.x + coord.y) % self.subdomains.len() as u32) as usize;
            self.subdomains[idx].as_str()
        };

        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }

    fn attribution(&self) -> &str {
        &self.attribution
    }
}
