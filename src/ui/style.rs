use crate::view::marker::MarkerColor;
use crate::view::overlay::TransitLine;
use egui::{Color32, FontId, Stroke};

/// Style configuration for the map canvas
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Background color where no tile has loaded yet
    pub background_color: Color32,
    pub attribution: AttributionStyle,
    pub markers: MarkerStyle,
}

/// Style for attribution text
#[derive(Debug, Clone)]
pub struct AttributionStyle {
    pub text_color: Color32,
    pub background_color: Color32,
    pub font_id: FontId,
    pub padding: f32,
}

/// Style for place markers
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub border_color: Color32,
    pub border_width: f32,
    /// Ring drawn around the marker whose card is open
    pub selected_stroke: Stroke,
    pub shadow_color: Color32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(221, 221, 214),
            attribution: AttributionStyle::default(),
            markers: MarkerStyle::default(),
        }
    }
}

impl Default for AttributionStyle {
    fn default() -> Self {
        Self {
            text_color: Color32::from_gray(60),
            background_color: Color32::from_rgba_unmultiplied(255, 255, 255, 200),
            font_id: FontId::proportional(10.0),
            padding: 3.0,
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            border_color: Color32::WHITE,
            border_width: 1.5,
            selected_stroke: Stroke::new(2.5, Color32::from_rgb(17, 24, 39)),
            shadow_color: Color32::from_black_alpha(60),
        }
    }
}

pub fn color32(color: MarkerColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

pub fn line_stroke(line: &TransitLine) -> Stroke {
    let alpha = (line.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    let c = line.color;
    Stroke::new(
        line.weight,
        Color32::from_rgba_unmultiplied(c.r, c.g, c.b, alpha),
    )
}
