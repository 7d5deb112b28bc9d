//! Configuration for the map view
//!
//! Options are grouped by concern (timing, zoom, store, tiles) and can be
//! produced from a preset profile or loaded from a JSON file. Every field has a
//! default, so a config file only needs the values it overrides.

use crate::core::constants;
use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum MapViewProfile {
    Standard,
    /// No fly-to animation and no pulse, for users who prefer reduced motion
    ReducedMotion,
    Custom(MapViewOptions),
}

impl MapViewProfile {
    pub fn resolve(&self) -> MapViewOptions {
        match self {
            Self::Standard => MapViewOptions::default(),
            Self::ReducedMotion => MapViewOptions {
                timing: TimingConfig {
                    fly_to_duration_ms: 0,
                    search_select_delay_ms: 0,
                    add_place_select_delay_ms: 0,
                    pulse_count: 0,
                    pulse_duration_ms: 0,
                },
                ..MapViewOptions::default()
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for MapViewProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewOptions {
    pub timing: TimingConfig,
    pub zoom: ZoomConfig,
    pub store: StoreConfig,
    pub tiles: TileConfig,
}

impl MapViewOptions {
    /// Loads options from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let options: Self = serde_json::from_str(&raw)
            .map_err(|e| MapError::Config(format!("{}: {}", path.display(), e)))?;
        options.validate()?;
        log::info!("Loaded map view options from {}", path.display());
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.zoom.default_center().is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "default center {:?}",
                self.zoom.default_center
            )));
        }
        if self.zoom.min_zoom > self.zoom.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.zoom.min_zoom, self.zoom.max_zoom
            )));
        }
        if self.tiles.tile_size == 0 {
            return Err(MapError::Config("tile_size must be positive".to_string()));
        }
        if !["{z}", "{x}", "{y}"]
            .iter()
            .all(|p| self.tiles.url_template.contains(p))
        {
            return Err(MapError::Config(format!(
                "tile url template '{}' lacks {{z}}/{{x}}/{{y}}",
                self.tiles.url_template
            )));
        }
        if self.store.retry_delay_ms == 0 && self.store.max_retries > 0 {
            log::warn!("store retries configured with a zero delay");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fly_to_duration_ms: u64,
    pub search_select_delay_ms: u64,
    pub add_place_select_delay_ms: u64,
    pub pulse_count: u32,
    pub pulse_duration_ms: u64,
}

impl TimingConfig {
    pub fn fly_to_duration(&self) -> Duration {
        Duration::from_millis(self.fly_to_duration_ms)
    }

    pub fn search_select_delay(&self) -> Duration {
        Duration::from_millis(self.search_select_delay_ms)
    }

    pub fn add_place_select_delay(&self) -> Duration {
        Duration::from_millis(self.add_place_select_delay_ms)
    }

    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.pulse_duration_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fly_to_duration_ms: constants::FLY_TO_DURATION.as_millis() as u64,
            search_select_delay_ms: constants::SEARCH_SELECT_DELAY.as_millis() as u64,
            add_place_select_delay_ms: constants::ADD_PLACE_SELECT_DELAY.as_millis() as u64,
            pulse_count: constants::PULSE_COUNT,
            pulse_duration_ms: constants::PULSE_DURATION.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub default_center: [f64; 2],
    pub default_zoom: f64,
    pub close_zoom: f64,
    pub add_place_zoom: f64,
    pub icon_zoom_threshold: f64,
    pub fit_bounds_padding: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl ZoomConfig {
    pub fn default_center(&self) -> LatLng {
        LatLng::from(self.default_center)
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            default_center: constants::DEFAULT_CENTER,
            default_zoom: constants::DEFAULT_ZOOM,
            close_zoom: constants::CLOSE_ZOOM,
            add_place_zoom: constants::ADD_PLACE_ZOOM,
            icon_zoom_threshold: constants::ICON_ZOOM_THRESHOLD,
            fit_bounds_padding: constants::FIT_BOUNDS_PADDING,
            min_zoom: 0.0,
            max_zoom: 18.0,
        }
    }
}

/// Remote entity storage connection and query retry policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub base_url: String,
    pub app_id: String,
    pub api_token: Option<String>,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub exponential_backoff: bool,
    pub request_timeout_ms: u64,
}

impl StoreConfig {
    /// Delay before retry number `attempt` (1-based)
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let base = Duration::from_millis(self.retry_delay_ms);
        if self.exponential_backoff {
            base.saturating_mul(1u32 << attempt.saturating_sub(1).min(16))
        } else {
            base
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.base44.com".to_string(),
            app_id: String::new(),
            api_token: None,
            max_retries: 3,
            retry_delay_ms: 1000,
            exponential_backoff: true,
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Raster tile URL with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    pub subdomains: Vec<String>,
    pub attribution: String,
    pub tile_size: u32,
    /// Decoded tiles kept in memory
    pub cache_capacity: usize,
    pub max_attempts: u32,
    pub user_agent: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: "© OpenStreetMap contributors".to_string(),
            tile_size: 256,
            cache_capacity: 512,
            max_attempts: 2,
            user_agent: concat!("placemap/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
