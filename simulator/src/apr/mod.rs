//! APR estimation and history simulation.
//!
//! Data flow:
//! PoolSnapshot → estimator → target APR → history → SimulatedPool
//!
//! Everything below `manager` is pure: same inputs, same outputs, no clock,
//! no shared state.

use rust_decimal::{Decimal, RoundingStrategy};

pub mod estimator;
pub mod history;
pub mod horizon;
pub mod manager;
pub mod noise;
pub mod types;

pub use estimator::compute_base_apr;
pub use history::{next_history, seed_history};
pub use horizon::{HORIZONS, Horizon, HorizonLabel};
pub use manager::AprManager;
pub use noise::noise;
pub use types::{HistoricalPoint, PoolBoard, PoolSnapshot, SimulatedPool};

/// Round to 2 decimal places, half away from zero, on the exact binary
/// value of `value` (0.045 is stored as 0.04499... and rounds to 0.04).
///
/// Values too large for `Decimal` are returned unchanged.
pub fn round2(value: f64) -> f64 {
    // Rounds to zero; also keeps sub-`Decimal` magnitudes off the slow path.
    if value.abs() < 0.004 {
        return 0.0;
    }

    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };

    let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32)
}

/// Final shaping applied to every displayed APR: 2 decimals, never negative.
///
/// Non-finite results (NaN, ±inf) collapse to 0.0.
pub fn clamp_apr(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    round2(value).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(21.995_458_395_486_5), 22.0);
        assert_eq!(round2(10.954), 10.95);
        assert_eq!(round2(-3.456), -3.46);
    }

    #[test]
    fn round2_rounds_the_stored_binary_value() {
        // Stored just below the midpoint.
        assert_eq!(round2(0.045), 0.04);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.005), 1.0);
        // Exactly representable midpoint goes away from zero.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
    }

    #[test]
    fn round2_passes_through_out_of_range_values() {
        assert_eq!(round2(1.0e30), 1.0e30);
        assert_eq!(round2(1.0e-30), 0.0);
    }

    #[test]
    fn clamp_apr_floors_negative_and_non_finite() {
        assert_eq!(clamp_apr(-0.5), 0.0);
        assert_eq!(clamp_apr(f64::NAN), 0.0);
        assert_eq!(clamp_apr(f64::INFINITY), 0.0);
        assert_eq!(clamp_apr(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_apr(4.321), 4.32);
    }
}
