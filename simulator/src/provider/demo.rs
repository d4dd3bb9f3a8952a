use async_trait::async_trait;

use super::{PoolProvider, ensure_unique_ids};
use crate::apr::types::PoolSnapshot;
use crate::error::ProviderError;

/// Fixed in-memory pool list.
#[derive(Clone, Debug, Default)]
pub struct StaticPoolProvider {
    pools: Vec<PoolSnapshot>,
}

impl StaticPoolProvider {
    pub fn new(pools: Vec<PoolSnapshot>) -> Result<Self, ProviderError> {
        ensure_unique_ids(&pools)?;
        Ok(Self { pools })
    }

    /// The five demo pools shown when no pool file is configured.
    pub fn demo() -> Self {
        // (id, pair, tvl, 24h volume, 24h fees, baseline apr)
        const DEMO: [(&str, &str, f64, f64, f64, f64); 5] = [
            ("aegis-ausd", "AEGIS/AUSD", 5_000_000.0, 500_000.0, 1_500.0, 45.2),
            ("aero-ausd", "AERO/AUSD", 4_000_000.0, 300_000.0, 600.0, 38.7),
            ("abtc-ausd", "ABTC/AUSD", 6_000_000.0, 800_000.0, 2_400.0, 52.2),
            ("aegis-asol", "AEGIS/ASOL", 3_000_000.0, 200_000.0, 1_050.0, 42.4),
            ("abtc-asol", "ABTC/ASOL", 4_500_000.0, 400_000.0, 1_600.0, 48.2),
        ];

        let pools = DEMO
            .iter()
            .map(|&(id, pair, tvl, volume, fees, apr)| PoolSnapshot {
                id: id.into(),
                name: Some(format!("{} Pool", pair.replace('/', "-"))),
                pair: Some(pair.into()),
                tvl_usd: tvl,
                volume_24h_usd: volume,
                fees_24h_usd: fees,
                baseline_apr: apr,
            })
            .collect();

        Self { pools }
    }
}

#[async_trait]
impl PoolProvider for StaticPoolProvider {
    async fn fetch_pools(&self) -> Result<Vec<PoolSnapshot>, ProviderError> {
        Ok(self.pools.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_pools_are_unique_and_populated() {
        let pools = StaticPoolProvider::demo().fetch_pools().await.unwrap();

        assert_eq!(pools.len(), 5);
        assert!(ensure_unique_ids(&pools).is_ok());
        assert!(pools.iter().all(|p| p.tvl_usd > 0.0 && p.baseline_apr > 0.0));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let p = PoolSnapshot::new("dup", 1.0, 1.0, 1.0, 1.0);
        let err = StaticPoolProvider::new(vec![p.clone(), p]).unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateId(id) if id == "dup"));
    }

    #[test]
    fn empty_ids_may_repeat() {
        let p = PoolSnapshot::new("", 1.0, 1.0, 1.0, 1.0);
        assert!(StaticPoolProvider::new(vec![p.clone(), p]).is_ok());
    }
}
