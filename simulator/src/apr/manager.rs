use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::estimator::compute_base_apr;
use super::history::{next_history, seed_history};
use super::horizon::{HORIZONS, Horizon};
use super::types::{PoolBoard, PoolSnapshot, SimulatedPool};
use crate::metrics::counters::Counters;

pub const DEFAULT_REFRESH: Duration = Duration::from_millis(15_000);

/// Owns the simulated state for one upstream pool list.
///
/// Lifecycle:
/// - `set_pools` / `reseed` → discard everything, seed from scratch
/// - `tick`                 → advance every pool one step toward its live estimate
/// - `snapshot`             → read-only copy for consumers
///
/// Not shared: a single owner drives it, so re-seed and tick never interleave.
pub struct AprManager {
    horizons: &'static [Horizon],
    interval_ms: u64,

    /// Upstream list the current state was seeded from; compared by identity.
    upstream: Arc<[PoolSnapshot]>,

    pools: Vec<SimulatedPool>,
    tick: u64,
    ts_ms: u64,
    counters: Counters,
}

impl AprManager {
    pub fn new(interval: Duration) -> Self {
        Self::with_horizons(&HORIZONS, interval)
    }

    pub fn with_horizons(horizons: &'static [Horizon], interval: Duration) -> Self {
        Self {
            horizons,
            // Step derivation divides by this; never zero.
            interval_ms: (interval.as_millis() as u64).max(1),
            upstream: Arc::from(Vec::new()),
            pools: Vec::new(),
            tick: 0,
            ts_ms: 0,
            counters: Counters::default(),
        }
    }

    pub fn with_counters(mut self, counters: Counters) -> Self {
        self.counters = counters;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Noise step for a wall-clock instant. Calls within one interval window
    /// share the same step.
    pub fn step_for(&self, now_ms: u64) -> u64 {
        now_ms / self.interval_ms
    }

    /// Accept an upstream list. Re-seeds only if its identity differs from the
    /// list currently tracked; returns whether a re-seed happened.
    pub fn set_pools(&mut self, pools: Arc<[PoolSnapshot]>, now_ms: u64) -> bool {
        if Arc::ptr_eq(&self.upstream, &pools) {
            self.counters.reseed_skipped.fetch_add(1, Ordering::Relaxed);
            debug!("upstream pool list unchanged; keeping simulated state");
            return false;
        }

        self.reseed(pools, now_ms);
        true
    }

    /// Replace all simulated state with a fresh seed of `pools`.
    ///
    /// Prior tick-evolved values never survive a re-seed.
    #[instrument(skip(self, pools), fields(pool_count = pools.len()))]
    pub fn reseed(&mut self, pools: Arc<[PoolSnapshot]>, now_ms: u64) {
        self.pools = pools
            .iter()
            .map(|pool| {
                let seed = if pool.id.is_empty() {
                    now_ms.to_string()
                } else {
                    pool.id.clone()
                };

                let apr = compute_base_apr(pool);
                let history = seed_history(self.horizons, apr, &seed);

                SimulatedPool {
                    source: pool.clone(),
                    apr: history.first().map_or(apr, |p| p.apr),
                    history,
                    seed,
                }
            })
            .collect();

        self.upstream = pools;
        self.tick = 0;
        self.ts_ms = now_ms;

        self.counters.reseeds.fetch_add(1, Ordering::Relaxed);
        self.counters
            .pools_tracked
            .store(self.pools.len() as u64, Ordering::Relaxed);

        info!(pools = self.pools.len(), "simulated pools re-seeded");
    }

    /// Advance every tracked pool by one step.
    ///
    /// The target comes from the upstream snapshot at the same index, not from
    /// the simulated value.
    #[instrument(skip(self))]
    pub fn tick(&mut self, now_ms: u64) {
        let step = self.step_for(now_ms);

        for (idx, pool) in self.pools.iter_mut().enumerate() {
            let source = self.upstream.get(idx).unwrap_or(&pool.source);
            let target = compute_base_apr(source);

            pool.history = next_history(self.horizons, &pool.history, target, &pool.seed, step);
            pool.apr = pool.history.first().map_or(target, |p| p.apr);

            debug!(pool_id = %pool.source.id, target, apr = pool.apr, "pool advanced");
        }

        self.tick += 1;
        self.ts_ms = now_ms;
        self.counters.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn pools(&self) -> &[SimulatedPool] {
        &self.pools
    }

    pub fn pool(&self, id: &str) -> Option<&SimulatedPool> {
        self.pools.iter().find(|p| p.id() == id)
    }

    pub fn snapshot(&self) -> PoolBoard {
        PoolBoard {
            tick: self.tick,
            ts_ms: self.ts_ms,
            pools: self.pools.clone(),
        }
    }

    /// Drop all simulated state (teardown).
    pub fn clear(&mut self) {
        self.pools.clear();
        self.upstream = Arc::from(Vec::new());
        self.tick = 0;
        self.counters.pools_tracked.store(0, Ordering::Relaxed);
    }
}

impl Default for AprManager {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH)
    }
}
