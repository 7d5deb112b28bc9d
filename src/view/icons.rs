//! Process-wide default marker assets.

use once_cell::sync::OnceCell;

const ICON_CDN: &str = "https://unpkg.com/leaflet@1.9.4/dist/images";

/// Image locations used for markers without a category tint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultIconAssets {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
}

static DEFAULT_ICONS: OnceCell<DefaultIconAssets> = OnceCell::new();

/// Initializes the default marker assets once; later calls return the same instance
pub fn init_default_icons() -> &'static DefaultIconAssets {
    DEFAULT_ICONS.get_or_init(|| {
        log::debug!("initialising default marker icons from {}", ICON_CDN);
        DefaultIconAssets {
            icon_url: format!("{}/marker-icon.png", ICON_CDN),
            icon_retina_url: format!("{}/marker-icon-2x.png", ICON_CDN),
            shadow_url: format!("{}/marker-shadow.png", ICON_CDN),
        }
    })
}

pub fn default_icons() -> Option<&'static DefaultIconAssets> {
    DEFAULT_ICONS.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let first = init_default_icons();
        let second = init_default_icons();

        assert!(std::ptr::eq(first, second));
        assert!(first.icon_retina_url.ends_with("marker-icon-2x.png"));
        assert_eq!(default_icons(), Some(first));
    }
}
