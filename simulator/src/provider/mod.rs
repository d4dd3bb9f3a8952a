//! Upstream pool sources.
//!
//! The engine only consumes pool lists; these are the thin seams the binary
//! and tests use to supply them.

pub mod demo;
pub mod json_file;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::apr::types::PoolSnapshot;
use crate::error::ProviderError;

pub use demo::StaticPoolProvider;
pub use json_file::JsonFilePoolProvider;

#[async_trait]
pub trait PoolProvider: Send + Sync {
    /// Current pool list, in display order.
    async fn fetch_pools(&self) -> Result<Vec<PoolSnapshot>, ProviderError>;
}

/// Ids key the noise seed and lookups, so they must be unique.
/// Empty ids are allowed (seeded from the clock).
pub(crate) fn ensure_unique_ids(pools: &[PoolSnapshot]) -> Result<(), ProviderError> {
    let mut seen = HashSet::new();
    for pool in pools.iter().filter(|p| !p.id.is_empty()) {
        if !seen.insert(pool.id.as_str()) {
            return Err(ProviderError::DuplicateId(pool.id.clone()));
        }
    }
    Ok(())
}
