use placemap::prelude::*;

/// Runs the egui canvas headless for a few frames
#[cfg(all(feature = "egui", feature = "tokio-runtime"))]
mod canvas_frames {
    use super::*;
    use egui::{Context, Pos2, RawInput, Rect, Vec2};

    fn offline_options(profile: MapViewProfile) -> MapViewOptions {
        let mut options = profile.resolve();
        // nothing listens on the discard port
        options.tiles.url_template = "http://127.0.0.1:9/{z}/{x}/{y}.png".to_string();
        options.tiles.subdomains.clear();
        options.tiles.max_attempts = 1;
        options
    }

    fn frame(ctx: &Context, canvas: &mut MapCanvas, view: &mut MapView) -> CanvasOutput {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            ..RawInput::default()
        };
        let mut output = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                output = Some(canvas.show(ui, view));
            });
        });
        output.unwrap()
    }

    fn katz() -> Place {
        NewPlace::new("Katz's", LatLng::new(40.7223, -73.9874), Category::Restaurant)
            .into_place(PlaceId::new("katz"))
    }

    #[tokio::test]
    async fn test_empty_view_renders() {
        let options = offline_options(MapViewProfile::Standard);
        let mut canvas = MapCanvas::new(&options).unwrap();
        let mut view = MapView::new(options);
        let ctx = Context::default();

        let output = frame(&ctx, &mut canvas, &mut view);
        assert_eq!(output.delta, Duration::ZERO);
        assert!(output.clicked_marker.is_none());
        assert!(output.selected.is_none());
    }

    #[tokio::test]
    async fn test_search_select_fires_through_frames() {
        let options = offline_options(MapViewProfile::ReducedMotion);
        let mut canvas = MapCanvas::new(&options).unwrap();
        let mut view = MapView::new(options);
        view.set_places(Arc::new(vec![katz()]));
        let ctx = Context::default();

        frame(&ctx, &mut canvas, &mut view);
        view.on_search_select(&katz());
        let output = frame(&ctx, &mut canvas, &mut view);

        assert_eq!(output.selected, Some(PlaceId::new("katz")));
        assert_eq!(view.selected().map(|p| p.name.as_str()), Some("Katz's"));
    }
}
