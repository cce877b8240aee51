use std::env;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use traffic_collector::catalog::abuja_catalog;
use traffic_collector::collection::{CollectionOrchestrator, DEFAULT_BATCH_PAUSE, DEFAULT_BATCH_SIZE, DEFAULT_MAX_WORKERS};
use traffic_collector::gate::{OsrmGate, DEFAULT_BASE_URL};
use traffic_collector::scheduler::CollectorService;
use traffic_collector::store::PersistenceMerger;
use traffic_collector::util::cli_args::parse_arg_optional;

/// Collects traffic conditions for the Abuja route catalog on a fixed interval.
///
/// Optional positional parameters:
/// <store_path> <interval_minutes> <max_workers> <batch_size> <osrm_base_url>
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let store_path: String = parse_arg_optional(&mut args, "abuja_traffic_data.csv".to_string());
    let interval_minutes: u64 = parse_arg_optional(&mut args, 30);
    let max_workers: usize = parse_arg_optional(&mut args, DEFAULT_MAX_WORKERS);
    let batch_size: usize = parse_arg_optional(&mut args, DEFAULT_BATCH_SIZE);
    let base_url: String = parse_arg_optional(&mut args, DEFAULT_BASE_URL.to_string());

    let catalog = Arc::new(abuja_catalog());
    let gate = Arc::new(OsrmGate::new(&base_url));

    let orchestrator = CollectionOrchestrator::new(gate, catalog).with_limits(max_workers, batch_size, DEFAULT_BATCH_PAUSE);
    let service = CollectorService::new(orchestrator, PersistenceMerger::new(&store_path));

    service.run_scheduler(Duration::from_secs(interval_minutes * 60)).await;

    Ok(())
}
