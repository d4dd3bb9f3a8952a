//! Per-horizon APR history.
//!
//! Each horizon is a first-order exponential filter driven by the same
//! exogenous target, with its own damping and slope bias, plus a small
//! deterministic noise term for visual texture.

use super::clamp_apr;
use super::horizon::Horizon;
use super::noise::{horizon_seed, noise};
use super::types::HistoricalPoint;

/// Total width of the seeding noise band (±0.25pp).
pub const SEED_NOISE_SPAN: f64 = 0.5;

/// Total width of the per-tick noise band (±0.175pp).
pub const TICK_NOISE_SPAN: f64 = 0.35;

/// Horizon-adjusted target.
pub fn desired_apr(horizon: &Horizon, target_apr: f64) -> f64 {
    target_apr * (1.0 + horizon.slope_bias)
}

/// One noise-free exponential step from `current` toward `desired`.
pub fn damped_step(current: f64, desired: f64, damping: f64) -> f64 {
    current + (desired - current) * (1.0 - damping)
}

fn centered_noise(seed: &str, horizon: &Horizon, step: u64, span: f64) -> f64 {
    (noise(&horizon_seed(seed, horizon.label), step) - 0.5) * span
}

/// Initial spread across horizons for a freshly seen pool.
///
/// The horizon index doubles as the noise step.
pub fn seed_history(horizons: &[Horizon], base_apr: f64, seed: &str) -> Vec<HistoricalPoint> {
    horizons
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            let jitter = centered_noise(seed, h, idx as u64, SEED_NOISE_SPAN);
            HistoricalPoint {
                label: h.label,
                apr: clamp_apr(desired_apr(h, base_apr) + jitter),
            }
        })
        .collect()
}

/// Advance every horizon by one tick toward `target_apr`.
///
/// Points are matched by label, so a short or reordered `history` is
/// tolerated; a missing horizon starts from `target_apr`. The output always
/// follows `horizons` order.
pub fn next_history(
    horizons: &[Horizon],
    history: &[HistoricalPoint],
    target_apr: f64,
    seed: &str,
    step: u64,
) -> Vec<HistoricalPoint> {
    horizons
        .iter()
        .map(|h| {
            let current = history
                .iter()
                .find(|p| p.label == h.label)
                .map_or(target_apr, |p| p.apr);

            let moved = damped_step(current, desired_apr(h, target_apr), h.damping);
            let jitter = centered_noise(seed, h, step, TICK_NOISE_SPAN);

            HistoricalPoint {
                label: h.label,
                apr: clamp_apr(moved + jitter),
            }
        })
        .collect()
}
