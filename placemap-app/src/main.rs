use anyhow::Context;
use placemap::{
    prelude::*,
    ui::{detail_card, filter_bar, search_box},
};

/// Environment variable naming an optional JSON options file
const CONFIG_ENV: &str = "PLACEMAP_CONFIG";

/// Standalone places viewer
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = load_options()?;
    let store = open_store(&options)?;
    let query = Arc::new(PlaceQuery::new(store, options.store.clone()));
    let worker = StoreWorker::spawn(query).context("starting store worker")?;
    worker.refresh()?;

    let canvas = MapCanvas::new(&options).context("creating map canvas")?;
    let app = PlacemapApp::new(MapView::new(options), canvas, worker);

    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("Placemap"),
        ..Default::default()
    };

    eframe::run_native("placemap-app", native, Box::new(|_cc| Box::new(app)))
        .map_err(|e| anyhow::anyhow!("viewer exited with an error: {}", e))
}

fn load_options() -> anyhow::Result<MapViewOptions> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => MapViewOptions::from_json_file(&path)
            .with_context(|| format!("loading options from {}", path)),
        Err(_) => Ok(MapViewProfile::Standard.resolve()),
    }
}

/// The hosted store when an app id is configured, otherwise an offline demo
fn open_store(options: &MapViewOptions) -> anyhow::Result<Arc<dyn PlaceStore>> {
    if options.store.app_id.trim().is_empty() {
        log::info!("no store.app_id configured; using the in-memory demo store");
        return Ok(Arc::new(MemoryPlaceStore::with_places(demo_places())));
    }
    let store = HttpPlaceStore::new(&options.store)?;
    log::info!("using place store at {}", store.collection_url());
    Ok(Arc::new(store))
}

fn demo_places() -> Vec<Place> {
    let entries = [
        ("demo-1", "Katz's Delicatessen", 40.7223, -73.9874, Category::Restaurant, "2024-05-02", true),
        ("demo-2", "The High Line", 40.7480, -74.0048, Category::Activity, "2024-04-20", false),
        ("demo-3", "Dead Rabbit", 40.7033, -74.0110, Category::Bar, "2024-03-15", false),
        ("demo-4", "Blue Bottle Coffee", 40.7420, -74.0048, Category::Cafe, "2024-02-11", true),
        ("demo-5", "Empire State Building", 40.7484, -73.9857, Category::Landmark, "2023-12-24", false),
    ];

    entries
        .into_iter()
        .map(|(id, name, lat, lng, category, visited, favorite)| {
            let mut place = NewPlace::new(name, LatLng::new(lat, lng), category);
            place.date_visited = Some(visited.to_string());
            place.is_favorite = favorite;
            place.into_place(PlaceId::new(id))
        })
        .collect()
}

struct PlacemapApp {
    view: MapView,
    canvas: MapCanvas,
    worker: StoreWorker,
    add_form: AddPlaceForm,
    show_add_form: bool,
    status: Option<String>,
}

impl PlacemapApp {
    fn new(view: MapView, canvas: MapCanvas, worker: StoreWorker) -> Self {
        Self {
            view,
            canvas,
            worker,
            add_form: AddPlaceForm::new(),
            show_add_form: false,
            status: None,
        }
    }

    fn drain_store_events(&mut self) {
        for event in self.worker.poll() {
            match event {
                StoreEvent::PlacesLoaded(places) => self.view.set_places(places),
                StoreEvent::Updated(place) => log::debug!("updated {}", place.id),
                StoreEvent::Created(place) => {
                    self.status = Some(format!("Added {}", place.name));
                    self.view.on_add_place_success(place);
                }
                StoreEvent::Failed { command, message } => {
                    self.status = Some(format!("Could not {} places: {}", command, message));
                }
            }
        }
    }

    fn apply(&mut self, actions: Vec<PanelAction>) {
        for action in actions {
            let sent = match action {
                PanelAction::Recenter => {
                    self.view.recenter(self.canvas.widget_mut());
                    Ok(())
                }
                PanelAction::UpdatePlace(id, patch) => self.worker.update_place(id, patch),
                PanelAction::CreatePlace(place) => {
                    self.show_add_form = false;
                    self.worker.create_place(place)
                }
            };
            if let Err(e) = sent {
                log::error!("{}", e);
                self.status = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for PlacemapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_store_events();
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Places");
                ui.separator();
                filter_bar(ui, &mut self.view, &mut actions);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Add place").clicked() {
                        self.show_add_form = !self.show_add_form;
                    }
                });
            });
        });

        egui::SidePanel::left("side_panel")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                search_box(ui, &mut self.view);
                ui.separator();
                if self.show_add_form {
                    self.add_form.show(ui, &mut actions);
                    ui.separator();
                }
                detail_card(ui, &mut self.view, &mut actions);
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.small(status);
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let output = self.canvas.show(ui, &mut self.view);
                if let Some(id) = output.selected {
                    log::debug!("selected {}", id);
                }
            });

        self.apply(actions);

        // store events arrive off the UI thread
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
