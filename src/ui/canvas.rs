//! egui map canvas
//!
//! Paints tiles, transit overlays and place markers for a [`MapView`], drives
//! the animated viewport from frame time and turns pointer input into pans,
//! zooms and marker clicks.

use super::style::{color32, line_stroke, MapStyle};
use crate::core::config::MapViewOptions;
use crate::core::geo::{LatLng, Point};
use crate::model::PlaceId;
use crate::tiles::{visible_tiles, FailedTiles, TemplateTileSource, TileCache, TileLoader, TileSource};
use crate::view::marker::MarkerSpec;
use crate::view::{AnimatedViewport, MapView, MapWidget};
use crate::Result;
use egui::{Color32, ColorImage, Pos2, Rect, Sense, Shape, Stroke, TextureHandle, Ui, Vec2};
use std::sync::Arc;
use std::time::Duration;

/// Scroll distance that changes zoom by one level
const SCROLL_PER_ZOOM_LEVEL: f64 = 240.0;
/// Frame deltas above this are treated as a stall
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
pub struct CanvasOutput {
    /// Frame time consumed this frame
    pub delta: Duration,
    pub clicked_marker: Option<PlaceId>,
    /// A deferred selection fired this frame
    pub selected: Option<PlaceId>,
}

pub struct MapCanvas {
    widget: AnimatedViewport,
    loader: TileLoader,
    textures: TileCache<TextureHandle>,
    /// Tiles that exhausted their attempts, cooling down before a retry
    failed: FailedTiles,
    max_tile_zoom: u8,
    style: MapStyle,
    last_frame: Option<instant::Instant>,
}

impl MapCanvas {
    pub fn new(options: &MapViewOptions) -> Result<Self> {
        let source: Arc<dyn TileSource> = Arc::new(TemplateTileSource::new(&options.tiles));
        Ok(Self {
            widget: AnimatedViewport::new(&options.zoom, Point::new(800.0, 600.0)),
            loader: TileLoader::new(source, &options.tiles)?,
            textures: TileCache::new(options.tiles.cache_capacity),
            failed: FailedTiles::default(),
            max_tile_zoom: options.zoom.max_zoom.clamp(0.0, 22.0) as u8,
            style: MapStyle::default(),
            last_frame: None,
        })
    }

    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    /// The widget the view drives; hand it to `MapView::recenter`
    pub fn widget_mut(&mut self) -> &mut dyn MapWidget {
        &mut self.widget
    }

    pub fn show(&mut self, ui: &mut Ui, view: &mut MapView) -> CanvasOutput {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.widget
            .set_size(Point::new(rect.width() as f64, rect.height() as f64));

        let delta = self.frame_delta();
        let mut output = CanvasOutput {
            delta,
            ..CanvasOutput::default()
        };

        view.sync_viewport(&mut self.widget);
        if let Some(zoom) = self.widget.advance(delta) {
            view.on_zoom_end(zoom);
        }
        output.selected = view.advance(delta);

        if response.dragged() {
            let drag = response.drag_delta();
            self.widget
                .pan(Point::new(drag.x as f64, drag.y as f64));
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y) as f64;
            if scroll.abs() > 0.1 {
                let focus = response
                    .hover_pos()
                    .map(|p| Point::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64));
                if let Some(zoom) = self.widget.zoom_by(scroll / SCROLL_PER_ZOOM_LEVEL, focus) {
                    view.on_zoom_end(zoom);
                }
            }
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.style.background_color);
        self.paint_tiles(ui.ctx(), &painter, rect);
        self.paint_overlays(&painter, rect, view);

        let markers = view.markers();
        let selected_id = view.selected().map(|p| p.id.clone());
        for marker in &markers {
            self.paint_marker(&painter, rect, marker, selected_id.as_ref() == Some(&marker.place_id));
        }
        self.paint_attribution(&painter, rect);

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                output.clicked_marker = self.marker_at(rect, &markers, pos);
            }
        }
        if let Some(id) = &output.clicked_marker {
            view.on_marker_click(id);
        }

        if self.widget.is_animating()
            || view.has_pending_selection()
            || view.highlighted().is_some()
            || self.loader.pending() > 0
        {
            ui.ctx().request_repaint();
        }
        output
    }

    fn frame_delta(&mut self) -> Duration {
        let now = instant::Instant::now();
        let delta = self
            .last_frame
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);
        delta.min(MAX_FRAME_DELTA)
    }

    fn to_screen(&self, rect: Rect, position: &LatLng) -> Pos2 {
        let p = self.widget.viewport().lat_lng_to_pixel(position);
        Pos2::new(rect.min.x + p.x as f32, rect.min.y + p.y as f32)
    }

    fn paint_tiles(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect) {
        let now = instant::Instant::now();
        self.failed.prune(now);
        for (coord, result) in self.loader.poll() {
            match result.and_then(|bytes| decode_tile(&bytes)) {
                Ok(image) => {
                    let texture = ctx.load_texture(
                        format!("tile_{}", coord),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.textures.insert(coord, texture);
                }
                Err(e) => {
                    log::warn!("tile {} unavailable: {}", coord, e);
                    self.failed.mark_failed(coord, now);
                }
            }
        }

        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        for placement in visible_tiles(self.widget.viewport(), self.max_tile_zoom) {
            match self.textures.get(&placement.coord) {
                Some(texture) => {
                    let min = rect.min + Vec2::new(placement.min.x as f32, placement.min.y as f32);
                    let tile_rect = Rect::from_min_size(min, Vec2::splat(placement.size as f32));
                    painter.image(texture.id(), tile_rect, uv, Color32::WHITE);
                }
                None if self.failed.may_request(&placement.coord, now) => {
                    self.loader.request(placement.coord);
                }
                None => {}
            }
        }
    }

    fn paint_overlays(&self, painter: &egui::Painter, rect: Rect, view: &MapView) {
        for line in view.overlays() {
            let points: Vec<Pos2> = line
                .points()
                .iter()
                .map(|p| self.to_screen(rect, p))
                .collect();
            painter.add(Shape::line(points, line_stroke(line)));
        }
    }

    /// Screen rectangle covered by a marker's pin, tip at the bottom center
    fn marker_rect(&self, rect: Rect, marker: &MarkerSpec) -> Rect {
        let tip = self.to_screen(rect, &marker.position);
        let (w, h) = marker.icon.dimensions();
        let scale = marker.scale as f32;
        let size = Vec2::new(w as f32 * scale, h as f32 * scale);
        Rect::from_min_max(Pos2::new(tip.x - size.x / 2.0, tip.y - size.y), Pos2::new(tip.x + size.x / 2.0, tip.y))
    }

    fn paint_marker(&self, painter: &egui::Painter, rect: Rect, marker: &MarkerSpec, selected: bool) {
        let pin = self.marker_rect(rect, marker);
        if !rect.intersects(pin) {
            return;
        }

        let style = &self.style.markers;
        let radius = pin.width() / 2.0;
        let head = Pos2::new(pin.center().x, pin.min.y + radius);
        let tip = Pos2::new(pin.center().x, pin.max.y);
        let fill = color32(marker.icon.color);
        let border = Stroke::new(style.border_width, style.border_color);

        painter.circle_filled(tip, radius * 0.35, style.shadow_color);
        painter.add(Shape::convex_polygon(
            vec![
                Pos2::new(head.x - radius * 0.85, head.y + radius * 0.5),
                tip,
                Pos2::new(head.x + radius * 0.85, head.y + radius * 0.5),
            ],
            fill,
            Stroke::NONE,
        ));
        painter.circle(head, radius, fill, border);
        painter.circle_filled(head, radius * 0.38, style.border_color);

        if selected {
            painter.circle_stroke(head, radius + 3.0, style.selected_stroke);
        }
    }

    /// Topmost marker under `pos`; later markers are painted above earlier ones
    fn marker_at(&self, rect: Rect, markers: &[MarkerSpec], pos: Pos2) -> Option<PlaceId> {
        markers
            .iter()
            .rev()
            .find(|m| self.marker_rect(rect, m).contains(pos))
            .map(|m| m.place_id.clone())
    }

    fn paint_attribution(&self, painter: &egui::Painter, rect: Rect) {
        let style = &self.style.attribution;
        let galley = painter.layout_no_wrap(
            self.loader.source().attribution().to_string(),
            style.font_id.clone(),
            style.text_color,
        );
        let size = galley.size() + Vec2::splat(style.padding * 2.0);
        let background = Rect::from_min_max(rect.max - size, rect.max);
        painter.rect_filled(background, 2.0, style.background_color);
        painter.galley(
            background.min + Vec2::splat(style.padding),
            galley,
            style.text_color,
        );
    }
}

fn decode_tile(bytes: &[u8]) -> Result<ColorImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| crate::MapError::Tile(e.to_string()))?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}
