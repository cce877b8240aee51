use std::time::Duration;

use chrono::Local;
use log::{error, info};

use crate::collection::CollectionOrchestrator;
use crate::gate::RouteInfoGate;
use crate::model::TrafficRecord;
use crate::store::{PersistenceMerger, StoreError, StoreStatistics};

/// What a triggered collection reports back: aggregate counts only, never
/// per-route error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSummary {
    pub records_saved: usize,
    pub routes_dropped: usize,
}

/// Per-route listing for the web layer's route index.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub route_name: String,
    pub origin: String,
    pub destination: String,
}

/// Facade over the pipeline: runs cycles and answers the handful of read
/// operations the excluded dashboard and training collaborators need.
pub struct CollectorService<G> {
    orchestrator: CollectionOrchestrator<G>,
    merger: PersistenceMerger,
}

impl<G: RouteInfoGate + 'static> CollectorService<G> {
    pub fn new(orchestrator: CollectionOrchestrator<G>, merger: PersistenceMerger) -> Self {
        Self { orchestrator, merger }
    }

    /// Runs one full cycle: fan-out, simulate, merge. Gate failures only
    /// reduce the count; a store failure loses the batch and surfaces here.
    pub async fn trigger_collection(&self) -> Result<CollectionSummary, StoreError> {
        let now = Local::now().naive_local();
        let outcome = self.orchestrator.collect(now).await;
        let records_saved = self.merger.merge(&outcome.records, now.date())?;

        Ok(CollectionSummary {
            records_saved,
            routes_dropped: outcome.dropped,
        })
    }

    pub fn read_recent(&self, n: usize) -> Result<Vec<TrafficRecord>, StoreError> {
        self.merger.read_recent(n)
    }

    pub fn download_store(&self) -> Result<Vec<u8>, StoreError> {
        self.merger.raw_bytes()
    }

    pub fn statistics(&self) -> Result<Option<StoreStatistics>, StoreError> {
        self.merger.statistics()
    }

    pub fn catalog_summary(&self) -> Vec<CatalogEntry> {
        self.orchestrator
            .catalog()
            .routes()
            .iter()
            .map(|route| CatalogEntry {
                route_name: route.name.clone(),
                origin: route.origin_label.clone(),
                destination: route.dest_label.clone(),
            })
            .collect()
    }

    /// Fixed-interval driver. A failed merge is logged and the loop carries
    /// on with the next cycle; there is no internal retry.
    pub async fn run_scheduler(&self, interval: Duration) {
        info!("scheduler started, one cycle every {:?}", interval);

        loop {
            match self.trigger_collection().await {
                Ok(summary) => info!(
                    "cycle complete: {} records saved, {} routes dropped",
                    summary.records_saved, summary.routes_dropped
                ),
                Err(err) => error!("cycle persistence failed, batch lost: {}", err),
            }

            tokio::time::sleep(interval).await;
        }
    }
}
