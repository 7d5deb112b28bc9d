use super::source::{TileCoord, TileSource};
use crate::core::config::TileConfig;
use crate::runtime::{self, async_utils::async_delay};
use crate::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use fxhash::FxHashSet;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

const RETRY_DELAY: Duration = Duration::from_millis(100);

pub type TileResult = (TileCoord, Result<Vec<u8>>);

/// Fetches raster tiles on the async runtime and hands the bytes back over a
/// channel the UI drains each frame.
pub struct TileLoader {
    client: Client,
    source: Arc<dyn TileSource>,
    max_attempts: u32,
    in_flight: FxHashSet<TileCoord>,
    tx: Sender<TileResult>,
    rx: Receiver<TileResult>,
}

impl TileLoader {
    pub fn new(source: Arc<dyn TileSource>, config: &TileConfig) -> Result<Self> {
        // public tile servers reject requests without a user agent
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        let (tx, rx) = unbounded();
        Ok(Self {
            client,
            source,
            max_attempts: config.max_attempts.max(1),
            in_flight: FxHashSet::default(),
            tx,
            rx,
        })
    }

    pub fn source(&self) -> &dyn TileSource {
        self.source.as_ref()
    }

    pub fn is_loading(&self, coord: &TileCoord) -> bool {
        self.in_flight.contains(coord)
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Starts downloading `coord` unless it is already in flight
    pub fn request(&mut self, coord: TileCoord) -> bool {
        if !self.in_flight.insert(coord) {
            return false;
        }

        let url = self.source.url(coord);
        let client = self.client.clone();
        let tx = self.tx.clone();
        let attempts = self.max_attempts;

        let spawned = runtime::spawn(async move {
            let result = fetch_with_retry(&client, &url, coord, attempts).await;
            let _ = tx.send((coord, result));
        });

        match spawned {
            Ok(_) => true,
            Err(e) => {
                log::warn!("cannot load tile {}: {}", coord, e);
                self.in_flight.remove(&coord);
                false
            }
        }
    }

    /// Completed downloads since the last call
    pub fn poll(&mut self) -> Vec<TileResult> {
        let done: Vec<TileResult> = self.rx.try_iter().collect();
        for (coord, _) in &done {
            self.in_flight.remove(coord);
        }
        done
    }
}

async fn fetch_with_retry(client: &Client, url: &str, coord: TileCoord, attempts: u32) -> Result<Vec<u8>> {
    let mut attempt = 1;
    loop {
        log::debug!("fetch tile {} attempt {}", coord, attempt);
        match fetch(client, url).await {
            Ok(bytes) => {
                log::debug!("downloaded tile {} ({} bytes)", coord, bytes.len());
                return Ok(bytes);
            }
            Err(e) if attempt < attempts => {
                log::warn!("tile {} download failed on attempt {}: {}", coord, attempt, e);
                attempt += 1;
                async_delay(RETRY_DELAY).await;
            }
            Err(e) => {
                log::error!("giving up on tile {}: {}", coord, e);
                return Err(e);
            }
        }
    }
}

async fn fetch(client: &Client, url: &str) -> Result<Vec<u8>> {
    let bytes = client.get(url).send().await?.error_for_status()?.bytes().await?;
    Ok(bytes.to_vec())
}

#[cfg(all(test, feature = "tokio-runtime"))]
mod tests {
    use super::*;
    use crate::tiles::source::TemplateTileSource;

    #[tokio::test]
    async fn test_duplicate_requests_are_ignored() {
        // unroutable host so nothing real is fetched
        let config = TileConfig {
            url_template: "http://127.0.0.1:9/{z}/{x}/{y}.png".to_string(),
            max_attempts: 1,
            ..TileConfig::default()
        };
        let source = Arc::new(TemplateTileSource::new(&config));
        let mut loader = TileLoader::new(source, &config).unwrap();
        let coord = TileCoord::new(0, 0, 0);

        assert!(loader.request(coord));
        assert!(!loader.request(coord));
        assert_eq!(loader.pending(), 1);

        let mut results = Vec::new();
        for _ in 0..100 {
            results.extend(loader.poll());
            if !results.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        assert_eq!(results.len(), 1);
        assert!(results[0].1.is_err());
        assert!(!loader.is_loading(&coord));
    }
}
