use std::sync::Arc;

use common::logger::{TraceId, child_span, root_span};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{Instrument, debug, info, warn};

use crate::apr::manager::AprManager;
use crate::apr::types::PoolSnapshot;
use crate::metrics::counters::Counters;
use crate::pool_view::PoolViewStore;
use crate::time::Clock;

/// Owned handle to a running simulation.
///
/// `stop()` shuts down gracefully; dropping the handle aborts the task.
/// Either way no tick fires after teardown.
pub struct AprServiceHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    view: PoolViewStore,
    counters: Counters,
    trace_id: TraceId,
}

impl AprServiceHandle {
    pub fn view(&self) -> &PoolViewStore {
        &self.view
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Signal the task and wait for it to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = ?e, "apr service task ended abnormally");
            }
        }
    }
}

impl Drop for AprServiceHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Start the simulation loop.
///
/// The current value of `pools_rx` is seeded immediately and published; the
/// first tick fires one full interval later.
pub fn spawn_apr_service<C: Clock>(
    manager: AprManager,
    pools_rx: watch::Receiver<Arc<[PoolSnapshot]>>,
    clock: C,
    view: PoolViewStore,
) -> AprServiceHandle {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let counters = manager.counters().clone();
    let trace_id = TraceId::new();

    let span = root_span("apr_service", &trace_id);
    let task = tokio::spawn(
        run(manager, pools_rx, clock, view.clone(), shutdown_rx).instrument(span),
    );

    AprServiceHandle {
        shutdown: Some(shutdown_tx),
        task: Some(task),
        view,
        counters,
        trace_id,
    }
}

async fn run<C: Clock>(
    mut manager: AprManager,
    mut pools_rx: watch::Receiver<Arc<[PoolSnapshot]>>,
    clock: C,
    view: PoolViewStore,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let period = manager.interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let initial = pools_rx.borrow_and_update().clone();
    manager.set_pools(initial, clock.now_ms());
    view.publish(manager.snapshot());

    info!(
        every_ms = period.as_millis() as u64,
        pools = manager.pools().len(),
        "apr service started"
    );

    let mut upstream_open = true;

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => break,

            changed = pools_rx.changed(), if upstream_open => {
                if changed.is_err() {
                    // Provider gone; keep ticking the last list.
                    warn!("pool provider channel closed");
                    upstream_open = false;
                    continue;
                }

                let pools = pools_rx.borrow_and_update().clone();
                let reseeded = child_span("reseed")
                    .in_scope(|| manager.set_pools(pools, clock.now_ms()));
                if reseeded {
                    view.publish(manager.snapshot());
                }
            }

            _ = ticker.tick() => {
                child_span("tick").in_scope(|| manager.tick(clock.now_ms()));
                let board = manager.snapshot();
                debug!(tick = board.tick, pools = board.pools.len(), "apr board published");
                view.publish(board);
            }
        }
    }

    // Pools do not outlive the manager.
    manager.clear();
    view.publish(manager.snapshot());
    info!(ticks = manager.counters().ticks(), "apr service stopped");
}
