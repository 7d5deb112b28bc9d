//! Cool-down for tiles whose download attempts ran out.

use super::source::TileCoord;
use fxhash::FxHashMap;
use instant::Instant;
use std::time::Duration;

/// Time a failed tile waits before it may be requested again
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Failed tiles with the instant each becomes requestable again
#[derive(Debug, Clone)]
pub struct FailedTiles {
    retry_after: Duration,
    until: FxHashMap<TileCoord, Instant>,
}

impl FailedTiles {
    pub fn new(retry_after: Duration) -> Self {
        Self {
            retry_after,
            until: FxHashMap::default(),
        }
    }

    pub fn mark_failed(&mut self, coord: TileCoord, now: Instant) {
        self.until.insert(coord, now + self.retry_after);
    }

    /// True when `coord` is not cooling down; an expired entry is dropped
    pub fn may_request(&mut self, coord: &TileCoord, now: Instant) -> bool {
        match self.until.get(coord) {
            Some(&until) if now < until => false,
            Some(_) => {
                self.until.remove(coord);
                true
            }
            None => true,
        }
    }

    /// Drops every expired entry
    pub fn prune(&mut self, now: Instant) {
        self.until.retain(|_, until| now < *until);
    }

    pub fn len(&self) -> usize {
        self.until.len()
    }

    pub fn is_empty(&self) -> bool {
        self.until.is_empty()
    }
}

impl Default for FailedTiles {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_AFTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_tile_is_retried_after_cooldown() {
        let mut failed = FailedTiles::new(Duration::from_secs(30));
        let coord = TileCoord::new(1205, 1539, 12);
        let start = Instant::now();

        failed.mark_failed(coord, start);
        assert!(!failed.may_request(&coord, start + Duration::from_secs(29)));
        assert!(failed.may_request(&coord, start + Duration::from_secs(30)));
        assert!(failed.is_empty());
        assert!(failed.may_request(&TileCoord::new(0, 0, 0), start));
    }

    #[test]
    fn test_prune_bounds_the_set() {
        let mut failed = FailedTiles::new(Duration::from_secs(5));
        let start = Instant::now();
        for x in 0..10 {
            failed.mark_failed(TileCoord::new(x, 0, 4), start);
        }
        failed.mark_failed(TileCoord::new(0, 1, 4), start + Duration::from_secs(4));

        failed.prune(start + Duration::from_secs(6));
        assert_eq!(failed.len(), 1);
    }
}
