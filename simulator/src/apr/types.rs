use serde::{Deserialize, Serialize};

use super::horizon::HorizonLabel;

/// Financial snapshot of a single pool, as supplied by the upstream provider.
///
/// Read-only for the engine. Key names follow the provider's JSON
/// (`slug`/`apr` are accepted as aliases for `id`/`baselineApr`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    #[serde(alias = "slug")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,

    pub tvl_usd: f64,
    pub volume_24h_usd: f64,
    pub fees_24h_usd: f64,

    /// Externally supplied APR, in percent.
    #[serde(alias = "apr")]
    pub baseline_apr: f64,
}

impl PoolSnapshot {
    pub fn new(
        id: impl Into<String>,
        tvl_usd: f64,
        volume_24h_usd: f64,
        fees_24h_usd: f64,
        baseline_apr: f64,
    ) -> Self {
        Self {
            id: id.into(),
            tvl_usd,
            volume_24h_usd,
            fees_24h_usd,
            baseline_apr,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub label: HorizonLabel,
    pub apr: f64,
}

/// A pool as shown to the rendering layer.
///
/// Invariant: `history.len() == HORIZONS.len()`, ordered like the table,
/// all values >= 0, and `apr == history[0].apr`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedPool {
    #[serde(flatten)]
    pub source: PoolSnapshot,

    /// Latest displayed APR (mirrors the shortest horizon).
    pub apr: f64,

    pub history: Vec<HistoricalPoint>,

    /// Noise seed this pool was seeded with; reused on every tick.
    #[serde(skip)]
    pub seed: String,
}

impl SimulatedPool {
    pub fn id(&self) -> &str {
        &self.source.id
    }

    pub fn apr_for(&self, label: HorizonLabel) -> Option<f64> {
        self.history.iter().find(|p| p.label == label).map(|p| p.apr)
    }
}

/// Read-only snapshot handed to consumers.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolBoard {
    /// Ticks applied since the last re-seed.
    pub tick: u64,

    /// Wall-clock time of the last re-seed or tick (ms since epoch).
    pub ts_ms: u64,

    pub pools: Vec<SimulatedPool>,
}

impl PoolBoard {
    pub fn pool(&self, id: &str) -> Option<&SimulatedPool> {
        self.pools.iter().find(|p| p.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
