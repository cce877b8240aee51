use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use traffic_collector::catalog::{Route, RouteCatalog};
use traffic_collector::collection::CollectionOrchestrator;
use traffic_collector::gate::{GateError, RouteInfo, RouteInfoGate};
use traffic_collector::scheduler::CollectorService;
use traffic_collector::store::PersistenceMerger;

/// Gate where every odd-numbered route is unreachable.
struct HalfBrokenGate;

#[async_trait]
impl RouteInfoGate for HalfBrokenGate {
    async fn fetch(&self, route: &Route) -> Result<RouteInfo, GateError> {
        let index: usize = route.name.rsplit('-').next().unwrap().parse().unwrap();
        if index % 2 == 1 {
            Err(GateError::Unreachable)
        } else {
            Ok(RouteInfo {
                distance_meters: 5000.0,
                duration_seconds: 480.0,
            })
        }
    }
}

fn service_in(dir: &TempDir, num_routes: usize) -> CollectorService<HalfBrokenGate> {
    let catalog = Arc::new(RouteCatalog::new(
        (0..num_routes)
            .map(|i| Route {
                name: format!("route-{}", i),
                origin: (7.45, 9.05),
                destination: (7.50, 9.06),
                origin_label: format!("suburb {}", i),
                dest_label: "center".to_string(),
            })
            .collect(),
    ));

    let orchestrator = CollectionOrchestrator::new(Arc::new(HalfBrokenGate), catalog).with_limits(3, 20, Duration::ZERO);
    CollectorService::new(orchestrator, PersistenceMerger::new(dir.path().join("traffic_data.csv")))
}

#[tokio::test]
async fn trigger_reports_saved_and_dropped_counts() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir, 10);

    let summary = service.trigger_collection().await.unwrap();

    assert_eq!(summary.records_saved, 5);
    assert_eq!(summary.routes_dropped, 5);
}

#[tokio::test]
async fn repeated_triggers_grow_the_same_day_store() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir, 6);

    service.trigger_collection().await.unwrap();
    service.trigger_collection().await.unwrap();

    let recent = service.read_recent(100).unwrap();
    assert_eq!(recent.len(), 6);
}

#[tokio::test]
async fn downloaded_store_matches_the_persisted_schema() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir, 4);

    service.trigger_collection().await.unwrap();

    let bytes = service.download_store().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let mut lines = text.lines();

    assert_eq!(
        lines.next().unwrap(),
        "timestamp,route_name,origin_label,dest_label,distance_km,base_duration_minutes,simulated_duration_minutes,\
         delay_minutes,traffic_status,multiplier,avg_speed_kmh,is_weekend,is_rush_hour,hour,day_of_week"
    );
    assert_eq!(lines.count(), 2);
}

#[tokio::test]
async fn statistics_become_available_after_a_cycle() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir, 4);

    assert!(service.statistics().unwrap().is_none());

    service.trigger_collection().await.unwrap();

    let stats = service.statistics().unwrap().unwrap();
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.unique_routes, 2);
}

#[tokio::test]
async fn catalog_summary_lists_every_route() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir, 5);

    let summary = service.catalog_summary();
    assert_eq!(summary.len(), 5);
    assert_eq!(summary[0].route_name, "route-0");
    assert_eq!(summary[0].origin, "suburb 0");
    assert_eq!(summary[0].destination, "center");
}
