use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{PoolProvider, ensure_unique_ids};
use crate::apr::types::PoolSnapshot;
use crate::error::ProviderError;

/// Reads a JSON array of pools on every fetch.
#[derive(Clone, Debug)]
pub struct JsonFilePoolProvider {
    path: PathBuf,
}

impl JsonFilePoolProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse a pool file body.
pub fn parse_pools(path: &Path, raw: &str) -> Result<Vec<PoolSnapshot>, ProviderError> {
    let pools: Vec<PoolSnapshot> =
        serde_json::from_str(raw).map_err(|source| ProviderError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    ensure_unique_ids(&pools)?;
    Ok(pools)
}

#[async_trait]
impl PoolProvider for JsonFilePoolProvider {
    #[instrument(skip(self), fields(path = %self.path.display()), level = "debug")]
    async fn fetch_pools(&self) -> Result<Vec<PoolSnapshot>, ProviderError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ProviderError::Io {
                path: self.path.clone(),
                source,
            })?;

        let pools = parse_pools(&self.path, &raw)?;
        debug!(pools = pools.len(), "pool file loaded");

        Ok(pools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_shaped_array() {
        let raw = r#"[
            {"slug": "a", "tvlUsd": 100, "volume24hUsd": 10, "fees24hUsd": 1, "apr": 12.5},
            {"id": "b", "tvlUsd": 0, "volume24hUsd": 0, "fees24hUsd": 0, "baselineApr": 3}
        ]"#;

        let pools = parse_pools(Path::new("pools.json"), raw).unwrap();
        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].id, "a");
        assert_eq!(pools[1].baseline_apr, 3.0);
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_pools(Path::new("p.json"), "[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_reports_path() {
        let err = parse_pools(Path::new("bad.json"), "{").unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let provider = JsonFilePoolProvider::new("/definitely/not/here/pools.json");
        let err = provider.fetch_pools().await.unwrap_err();
        assert!(matches!(err, ProviderError::Io { .. }));
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("apr-pools-{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"[{"id": "x", "tvlUsd": 1000, "volume24hUsd": 50, "fees24hUsd": 2, "baselineApr": 9}]"#,
        )
        .await
        .unwrap();

        let pools = JsonFilePoolProvider::new(&path).fetch_pools().await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].id, "x");
    }
}
