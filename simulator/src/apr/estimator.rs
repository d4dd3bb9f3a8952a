//! Base APR estimator.
//!
//! Blends the provider's baseline APR with the annualized trailing-24h fee
//! yield, then scales by a bounded volume boost.

use super::clamp_apr;
use super::types::PoolSnapshot;

pub const DAYS_PER_YEAR: f64 = 365.0;
pub const BASELINE_WEIGHT: f64 = 0.65;
pub const FEE_WEIGHT: f64 = 0.35;

/// Maximum relative move the volume boost can apply (±8%).
pub const BOOST_AMPLITUDE: f64 = 0.08;

/// Annualized fee yield in percent. Zero when the pool has no TVL.
pub fn fee_apr(pool: &PoolSnapshot) -> f64 {
    if pool.tvl_usd > 0.0 {
        (pool.fees_24h_usd / pool.tvl_usd) * DAYS_PER_YEAR * 100.0
    } else {
        0.0
    }
}

/// 24h volume over TVL. Zero when the pool has no TVL.
pub fn volume_ratio(pool: &PoolSnapshot) -> f64 {
    if pool.tvl_usd > 0.0 {
        pool.volume_24h_usd / pool.tvl_usd
    } else {
        0.0
    }
}

/// Saturating multiplier in `[1 - BOOST_AMPLITUDE, 1 + BOOST_AMPLITUDE]`.
///
/// Neutral (1.0) when volume equals TVL.
pub fn volume_boost(volume_ratio: f64) -> f64 {
    1.0 + BOOST_AMPLITUDE * (volume_ratio - 1.0).tanh()
}

/// Target APR for a pool: `max(0, round2(blended * boost))`.
pub fn compute_base_apr(pool: &PoolSnapshot) -> f64 {
    let boost = volume_boost(volume_ratio(pool));
    let blended = BASELINE_WEIGHT * pool.baseline_apr + FEE_WEIGHT * fee_apr(pool);

    clamp_apr(blended * boost)
}
