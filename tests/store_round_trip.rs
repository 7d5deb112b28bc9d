use placemap::prelude::*;

/// The view and the store worker wired together the way the app wires them
#[cfg(feature = "tokio-runtime")]
mod store_round_trip {
    use super::*;

    fn fast_retries() -> StoreConfig {
        StoreConfig {
            max_retries: 1,
            retry_delay_ms: 1,
            ..StoreConfig::default()
        }
    }

    fn seeded_worker(places: Vec<Place>) -> (Arc<MemoryPlaceStore>, StoreWorker) {
        let store = Arc::new(MemoryPlaceStore::with_places(places));
        let query = Arc::new(PlaceQuery::new(store.clone(), fast_retries()));
        let worker = StoreWorker::spawn(query).unwrap();
        (store, worker)
    }

    /// Feeds worker events into the view until `done` holds
    async fn pump_until(
        worker: &StoreWorker,
        view: &mut MapView,
        mut done: impl FnMut(&StoreEvent) -> bool,
    ) -> Vec<StoreEvent> {
        let mut seen = Vec::new();
        for _ in 0..200 {
            while let Some(event) = worker.recv_timeout(Duration::ZERO) {
                match &event {
                    StoreEvent::PlacesLoaded(places) => view.set_places(places.clone()),
                    StoreEvent::Created(place) => view.on_add_place_success(place.clone()),
                    _ => {}
                }
                let finished = done(&event);
                seen.push(event);
                if finished {
                    return seen;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("store events never settled: {:?}", seen);
    }

    fn katz() -> Place {
        let mut place = NewPlace::new("Katz's", LatLng::new(40.7223, -73.9874), Category::Restaurant);
        place.date_visited = Some("2024-05-02".to_string());
        place.into_place(PlaceId::new("katz"))
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_favorite_toggle_lands_after_refetch() {
        let (_store, worker) = seeded_worker(vec![katz()]);
        let mut view = MapView::default();

        worker.refresh().unwrap();
        pump_until(&worker, &mut view, |e| matches!(e, StoreEvent::PlacesLoaded(_))).await;
        assert!(view.on_marker_click(&PlaceId::new("katz")));

        let (id, patch) = view.toggle_favorite(&PlaceId::new("katz")).unwrap();
        // nothing changes locally until the store confirms
        assert!(!view.selected().unwrap().is_favorite);

        worker.update_place(id, patch).unwrap();
        let events = pump_until(&worker, &mut view, |e| matches!(e, StoreEvent::PlacesLoaded(_))).await;

        assert!(matches!(events[0], StoreEvent::Updated(ref p) if p.is_favorite));
        assert!(view.place(&PlaceId::new("katz")).unwrap().is_favorite);
        assert!(view.selected().unwrap().is_favorite);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_created_place_is_selected_after_delay() {
        let (store, worker) = seeded_worker(vec![katz()]);
        let mut view = MapView::default();
        let mut widget = placemap::view::RecordingWidget::default();

        let new_place = NewPlace::new("Joe's Pizza", LatLng::new(40.7306, -73.9895), Category::Restaurant);
        worker.create_place(new_place).unwrap();
        pump_until(&worker, &mut view, |e| matches!(e, StoreEvent::PlacesLoaded(_))).await;

        assert_eq!(view.places().len(), 2);
        assert_eq!(store.list_calls(), 1);
        assert!(view.sync_viewport(&mut widget));
        assert_eq!(widget.fly_to_calls[0].1, 15.0);

        assert_eq!(view.advance(Duration::from_millis(799)), None);
        let selected = view.advance(Duration::from_millis(1)).unwrap();
        assert_eq!(view.place(&selected).unwrap().name, "Joe's Pizza");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_update_reports_and_keeps_snapshot() {
        let (_store, worker) = seeded_worker(vec![katz()]);
        let mut view = MapView::default();

        worker.refresh().unwrap();
        pump_until(&worker, &mut view, |e| matches!(e, StoreEvent::PlacesLoaded(_))).await;

        worker
            .update_place(PlaceId::new("missing"), PlacePatch::favorite(true))
            .unwrap();
        let events = pump_until(&worker, &mut view, |e| matches!(e, StoreEvent::Failed { .. })).await;

        assert!(matches!(events[0], StoreEvent::Failed { command: "update", .. }));
        assert_eq!(view.places().len(), 1);
    }
}
