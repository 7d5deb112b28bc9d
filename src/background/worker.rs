//! Store worker bridging the synchronous UI to the async place query
//!
//! The UI pushes [`StoreCommand`]s over a crossbeam channel and drains
//! [`StoreEvent`]s once per frame. Each command runs as its own task on the
//! configured runtime, so a slow list fetch never holds up a favorite toggle.

use crate::model::{NewPlace, Place, PlaceId, PlacePatch};
use crate::runtime::{self, async_utils::async_delay, AsyncHandle};
use crate::store::PlaceQuery;
use crate::{MapError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

/// Idle pause between polls of the command channel
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(15);

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    /// Load the place list, from cache when fresh
    Refresh,
    Update { id: PlaceId, patch: PlacePatch },
    Create(NewPlace),
}

impl StoreCommand {
    pub fn name(&self) -> &'static str {
        match self {
            StoreCommand::Refresh => "refresh",
            StoreCommand::Update { .. } => "update",
            StoreCommand::Create(_) => "create",
        }
    }
}

#[derive(Debug, Clone)]
pub enum StoreEvent {
    PlacesLoaded(Arc<Vec<Place>>),
    Updated(Place),
    Created(Place),
    Failed { command: &'static str, message: String },
}

pub struct StoreWorker {
    command_tx: Sender<StoreCommand>,
    event_rx: Receiver<StoreEvent>,
    _handle: Box<dyn AsyncHandle>,
}

impl StoreWorker {
    /// Starts the worker loop on the process-wide runtime
    pub fn spawn(query: Arc<PlaceQuery>) -> Result<Self> {
        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        log::debug!("starting store worker for query '{}'", query.key());
        let handle = runtime::spawn(worker_loop(query, command_rx, event_tx))?;

        Ok(Self {
            command_tx,
            event_rx,
            _handle: handle,
        })
    }

    pub fn send(&self, command: StoreCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|e| MapError::Runtime(format!("store worker stopped: {}", e)))
    }

    pub fn refresh(&self) -> Result<()> {
        self.send(StoreCommand::Refresh)
    }

    pub fn update_place(&self, id: PlaceId, patch: PlacePatch) -> Result<()> {
        self.send(StoreCommand::Update { id, patch })
    }

    pub fn create_place(&self, place: NewPlace) -> Result<()> {
        self.send(StoreCommand::Create(place))
    }

    /// Drains every event produced since the last poll (non-blocking)
    pub fn poll(&self) -> Vec<StoreEvent> {
        self.event_rx.try_iter().collect()
    }

    /// Waits up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<StoreEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Runs until every command sender is dropped
async fn worker_loop(
    query: Arc<PlaceQuery>,
    command_rx: Receiver<StoreCommand>,
    event_tx: Sender<StoreEvent>,
) {
    loop {
        match command_rx.try_recv() {
            Ok(command) => {
                let query = query.clone();
                let event_tx = event_tx.clone();
                if let Err(e) = runtime::spawn(async move {
                    for event in execute(&query, command).await {
                        let _ = event_tx.send(event);
                    }
                }) {
                    log::warn!("could not run store command: {}", e);
                }
            }
            Err(TryRecvError::Empty) => async_delay(IDLE_POLL_INTERVAL).await,
            Err(TryRecvError::Disconnected) => {
                log::debug!("store worker shutting down");
                break;
            }
        }
    }
}

/// Runs one command; successful mutations are followed by a refetch
async fn execute(query: &PlaceQuery, command: StoreCommand) -> Vec<StoreEvent> {
    let name = command.name();
    let outcome = match command {
        StoreCommand::Refresh => query.list().await.map(StoreEvent::PlacesLoaded),
        StoreCommand::Update { id, patch } => query.update(&id, &patch).await.map(StoreEvent::Updated),
        StoreCommand::Create(new_place) => query.create(&new_place).await.map(StoreEvent::Created),
    };

    match outcome {
        Ok(loaded @ StoreEvent::PlacesLoaded(_)) => vec![loaded],
        Ok(mutated) => vec![mutated, refetch(query).await],
        Err(e) => vec![failed(name, e)],
    }
}

async fn refetch(query: &PlaceQuery) -> StoreEvent {
    match query.list().await {
        Ok(places) => StoreEvent::PlacesLoaded(places),
        Err(e) => failed(StoreCommand::Refresh.name(), e),
    }
}

fn failed(command: &'static str, error: MapError) -> StoreEvent {
    log::warn!("store {} failed: {}", command, error);
    StoreEvent::Failed {
        command,
        message: error.to_string(),
    }
}

#[cfg(all(test, feature = "tokio-runtime"))]
mod tests {
    use super::*;
    use crate::core::config::StoreConfig;
    use crate::core::geo::LatLng;
    use crate::model::Category;
    use crate::store::MemoryPlaceStore;

    fn fast_retries() -> StoreConfig {
        StoreConfig {
            max_retries: 1,
            retry_delay_ms: 1,
            ..StoreConfig::default()
        }
    }

    async fn next_event(worker: &StoreWorker) -> StoreEvent {
        for _ in 0..200 {
            if let Some(event) = worker.recv_timeout(Duration::ZERO) {
                return event;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no store event within 2s");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_refresh_loads_places() {
        let store = Arc::new(MemoryPlaceStore::new());
        let query = Arc::new(PlaceQuery::new(store, fast_retries()));
        let worker = StoreWorker::spawn(query).unwrap();

        worker.refresh().unwrap();
        match next_event(&worker).await {
            StoreEvent::PlacesLoaded(places) => assert!(places.is_empty()),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_reports_place_then_refetches() {
        let store = Arc::new(MemoryPlaceStore::new());
        let query = Arc::new(PlaceQuery::new(store, fast_retries()));
        let worker = StoreWorker::spawn(query).unwrap();

        worker
            .create_place(NewPlace::new("Joe's Pizza", LatLng::new(40.7306, -73.9895), Category::Restaurant))
            .unwrap();

        let created = match next_event(&worker).await {
            StoreEvent::Created(place) => place,
            other => panic!("unexpected event {:?}", other),
        };
        match next_event(&worker).await {
            StoreEvent::PlacesLoaded(places) => assert_eq!(places[0].id, created.id),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_update_is_reported() {
        let store = Arc::new(MemoryPlaceStore::new());
        let query = Arc::new(PlaceQuery::new(store, fast_retries()));
        let worker = StoreWorker::spawn(query).unwrap();

        worker
            .update_place(PlaceId::new("missing"), PlacePatch::favorite(true))
            .unwrap();
        match next_event(&worker).await {
            StoreEvent::Failed { command, .. } => assert_eq!(command, "update"),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
