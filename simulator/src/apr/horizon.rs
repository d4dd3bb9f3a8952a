use std::fmt;

use serde::{Deserialize, Serialize};

/// Named time window for which a separate smoothed APR trend is tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizonLabel {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    OneYear,
}

impl HorizonLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizonLabel::OneDay => "1D",
            HorizonLabel::OneWeek => "1W",
            HorizonLabel::OneMonth => "1M",
            HorizonLabel::ThreeMonths => "3M",
            HorizonLabel::OneYear => "1Y",
        }
    }
}

impl fmt::Display for HorizonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-horizon smoothing configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Horizon {
    pub label: HorizonLabel,

    /// Fraction of the previous value retained each tick, in `[0, 1)`.
    /// Closer to 1 => slower-moving series.
    pub damping: f64,

    /// Systematic offset from the instantaneous target
    /// (`desired = target * (1 + slope_bias)`).
    pub slope_bias: f64,
}

/// Horizon table, shortest first. Index 0 is the displayed "current" APR.
pub const HORIZONS: [Horizon; 5] = [
    Horizon {
        label: HorizonLabel::OneDay,
        damping: 0.65,
        slope_bias: 0.0,
    },
    Horizon {
        label: HorizonLabel::OneWeek,
        damping: 0.75,
        slope_bias: -0.03,
    },
    Horizon {
        label: HorizonLabel::OneMonth,
        damping: 0.82,
        slope_bias: -0.05,
    },
    Horizon {
        label: HorizonLabel::ThreeMonths,
        damping: 0.90,
        slope_bias: -0.08,
    },
    Horizon {
        label: HorizonLabel::OneYear,
        damping: 0.95,
        slope_bias: -0.12,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ordered_and_damping_in_range() {
        let labels: Vec<&str> = HORIZONS.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["1D", "1W", "1M", "3M", "1Y"]);

        for h in &HORIZONS {
            assert!((0.0..1.0).contains(&h.damping), "{} damping", h.label);
        }

        // Longer horizons move slower.
        assert!(HORIZONS.windows(2).all(|w| w[0].damping < w[1].damping));
    }

    #[test]
    fn label_serializes_as_short_code() {
        let json = serde_json::to_string(&HorizonLabel::ThreeMonths).unwrap();
        assert_eq!(json, "\"3M\"");
    }
}
