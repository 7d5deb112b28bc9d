use super::selection::SelectionController;
use crate::core::constants::{MARKER_ICON_SIZE, MARKER_ICON_SIZE_SMALL};
use crate::core::geo::LatLng;
use crate::model::{Category, Place, PlaceId};
use std::fmt;

/// RGB marker tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl MarkerColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const RED: MarkerColor = MarkerColor::rgb(0xef, 0x44, 0x44);
    pub const GREEN: MarkerColor = MarkerColor::rgb(0x22, 0xc5, 0x5e);
    pub const VIOLET: MarkerColor = MarkerColor::rgb(0x8b, 0x5c, 0xf6);
    pub const ORANGE: MarkerColor = MarkerColor::rgb(0xf9, 0x73, 0x16);
    pub const BLUE: MarkerColor = MarkerColor::rgb(0x3b, 0x82, 0xf6);
    pub const GREY: MarkerColor = MarkerColor::rgb(0x6b, 0x72, 0x80);

    pub fn for_category(category: &Category) -> Self {
        match category {
            Category::Restaurant => Self::RED,
            Category::Activity => Self::GREEN,
            Category::Bar => Self::VIOLET,
            Category::Cafe => Self::ORANGE,
            Category::Landmark => Self::BLUE,
            Category::Other(_) => Self::GREY,
        }
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconSize {
    Small,
    Regular,
}

impl IconSize {
    /// Regular icons from `threshold` upward
    pub fn for_zoom(zoom: f64, threshold: f64) -> Self {
        if zoom >= threshold {
            IconSize::Regular
        } else {
            IconSize::Small
        }
    }

    pub fn dimensions(self) -> (u32, u32) {
        match self {
            IconSize::Small => MARKER_ICON_SIZE_SMALL,
            IconSize::Regular => MARKER_ICON_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerIcon {
    pub color: MarkerColor,
    pub size: IconSize,
}

impl MarkerIcon {
    pub fn dimensions(&self) -> (u32, u32) {
        self.size.dimensions()
    }

    /// Pixel offset of the pin tip from the icon's top-left corner
    pub fn anchor(&self) -> (u32, u32) {
        let (w, h) = self.dimensions();
        (w / 2, h)
    }
}

/// Icon for a place of `category` seen at `zoom`
pub fn icon_for(category: &Category, zoom: f64, threshold: f64) -> MarkerIcon {
    MarkerIcon {
        color: MarkerColor::for_category(category),
        size: IconSize::for_zoom(zoom, threshold),
    }
}

/// Everything the rendering layer needs to draw one marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub place_id: PlaceId,
    pub position: LatLng,
    pub title: String,
    pub icon: MarkerIcon,
    pub is_pulsing: bool,
    /// 1.0 unless the marker is pulsing
    pub scale: f64,
}

pub fn build_markers(
    places: &[&Place],
    zoom: f64,
    threshold: f64,
    selection: &SelectionController,
) -> Vec<MarkerSpec> {
    places
        .iter()
        .map(|place| {
            let pulse = selection.pulse_scale(&place.id);
            MarkerSpec {
                place_id: place.id.clone(),
                position: place.position(),
                title: place.name.clone(),
                icon: icon_for(&place.category, zoom, threshold),
                is_pulsing: pulse.is_some(),
                scale: pulse.unwrap_or(1.0),
            }
        })
        .collect()
}
