use std::sync::Arc;

use parking_lot::RwLock;

use crate::apr::types::{PoolBoard, SimulatedPool};

/// In-memory holder of the latest simulated board.
/// Written by the service task, read synchronously by the rendering layer.
#[derive(Clone, Default)]
pub struct PoolViewStore {
    inner: Arc<RwLock<PoolBoard>>,
}

impl PoolViewStore {
    /// Create an empty view store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published board. Last write wins.
    pub fn publish(&self, board: PoolBoard) {
        *self.inner.write() = board;
    }

    /// Copy of the current board.
    pub fn get(&self) -> PoolBoard {
        self.inner.read().clone()
    }

    pub fn pool(&self, id: &str) -> Option<SimulatedPool> {
        self.inner.read().pool(id).cloned()
    }

    pub fn tick(&self) -> u64 {
        self.inner.read().tick
    }

    pub fn len(&self) -> usize {
        self.inner.read().pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
