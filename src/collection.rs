use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use log::{debug, warn};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::catalog::{Route, RouteCatalog};
use crate::gate::{RouteInfo, RouteInfoGate};
use crate::model::TrafficRecord;
use crate::simulation::{TrafficSimulator, UniformDraw};

pub const DEFAULT_MAX_WORKERS: usize = 5;
pub const DEFAULT_BATCH_SIZE: usize = 20;
pub const DEFAULT_BATCH_PAUSE: Duration = Duration::from_millis(500);

/// Everything one collection cycle produced. Records carry no ordering
/// guarantee; consumers key on `route_name`.
#[derive(Debug, Default)]
pub struct CycleOutcome {
    pub records: Vec<TrafficRecord>,
    pub dropped: usize,
}

/// Fans one collection cycle out over the catalog.
///
/// At most `max_workers` gate calls are in flight at once, and routes are
/// dispatched in `batch_size` chunks with a pause in between so a large
/// catalog does not hammer the shared routing service. A failed route is
/// dropped for the cycle; the cycle itself never fails.
pub struct CollectionOrchestrator<G> {
    gate: Arc<G>,
    catalog: Arc<RouteCatalog>,
    max_workers: usize,
    batch_size: usize,
    batch_pause: Duration,
}

impl<G: RouteInfoGate + 'static> CollectionOrchestrator<G> {
    pub fn new(gate: Arc<G>, catalog: Arc<RouteCatalog>) -> Self {
        Self {
            gate,
            catalog,
            max_workers: DEFAULT_MAX_WORKERS,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause: DEFAULT_BATCH_PAUSE,
        }
    }

    pub fn with_limits(mut self, max_workers: usize, batch_size: usize, batch_pause: Duration) -> Self {
        assert!(max_workers > 0 && batch_size > 0);
        self.max_workers = max_workers;
        self.batch_size = batch_size;
        self.batch_pause = batch_pause;
        self
    }

    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    pub async fn collect(&self, now: NaiveDateTime) -> CycleOutcome {
        let limiter = Arc::new(Semaphore::new(self.max_workers));
        let mut outcome = CycleOutcome::default();

        for (batch_idx, batch) in self.catalog.routes().chunks(self.batch_size).enumerate() {
            if batch_idx > 0 && !self.batch_pause.is_zero() {
                tokio::time::sleep(self.batch_pause).await;
            }

            let mut tasks = JoinSet::new();
            for route in batch {
                let route = route.clone();
                let gate = Arc::clone(&self.gate);
                let limiter = Arc::clone(&limiter);

                tasks.spawn(async move {
                    let _permit = match limiter.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => return None,
                    };

                    match gate.fetch(&route).await {
                        Ok(info) => Some(process_route(&route, &info, now)),
                        Err(err) => {
                            warn!("dropping route '{}' for this cycle: {}", route.name, err);
                            None
                        }
                    }
                });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Some(record)) => outcome.records.push(record),
                    Ok(None) => outcome.dropped += 1,
                    Err(err) => {
                        warn!("route task failed to complete: {}", err);
                        outcome.dropped += 1;
                    }
                }
            }

            debug!(
                "batch {} done, {} records so far, {} routes dropped",
                batch_idx,
                outcome.records.len(),
                outcome.dropped
            );
        }

        outcome
    }
}

fn process_route(route: &Route, info: &RouteInfo, now: NaiveDateTime) -> TrafficRecord {
    let mut simulator = TrafficSimulator::new(UniformDraw::new(rand::thread_rng()));
    let simulated = simulator.simulate(now, info.duration_seconds / 60.0);
    TrafficRecord::build(route, info, &simulated, now)
}
