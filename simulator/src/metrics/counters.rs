use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    pub ticks: Arc<AtomicU64>,
    pub reseeds: Arc<AtomicU64>,

    /// Upstream lists ignored because their identity did not change.
    pub reseed_skipped: Arc<AtomicU64>,

    /// Gauge: pools currently simulated.
    pub pools_tracked: Arc<AtomicU64>,
}

impl Counters {
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn reseeds(&self) -> u64 {
        self.reseeds.load(Ordering::Relaxed)
    }

    pub fn reseed_skipped(&self) -> u64 {
        self.reseed_skipped.load(Ordering::Relaxed)
    }

    pub fn pools_tracked(&self) -> u64 {
        self.pools_tracked.load(Ordering::Relaxed)
    }
}
