use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use traffic_collector::catalog::{Route, RouteCatalog};
use traffic_collector::collection::CollectionOrchestrator;
use traffic_collector::gate::{GateError, RouteInfo, RouteInfoGate};

fn tuesday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 11).unwrap().and_hms_opt(8, 30, 0).unwrap()
}

fn dummy_route(name: &str) -> Route {
    Route {
        name: name.to_string(),
        origin: (7.45, 9.05),
        destination: (7.50, 9.06),
        origin_label: format!("{} origin", name),
        dest_label: format!("{} destination", name),
    }
}

fn dummy_catalog(num_routes: usize) -> Arc<RouteCatalog> {
    Arc::new(RouteCatalog::new((0..num_routes).map(|i| dummy_route(&format!("route-{}", i))).collect()))
}

/// Gate that answers from a fixed script: listed routes fail, the rest
/// succeed with a constant baseline. Tracks in-flight call concurrency.
struct ScriptedGate {
    failing: HashSet<String>,
    failure: GateError,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedGate {
    fn new(failing: impl IntoIterator<Item = String>, failure: GateError) -> Self {
        Self {
            failing: failing.into_iter().collect(),
            failure,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn all_succeeding() -> Self {
        Self::new(Vec::new(), GateError::Unreachable)
    }
}

#[async_trait]
impl RouteInfoGate for ScriptedGate {
    async fn fetch(&self, route: &Route) -> Result<RouteInfo, GateError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&route.name) {
            Err(self.failure)
        } else {
            Ok(RouteInfo {
                distance_meters: 4040.0,
                duration_seconds: 300.0,
            })
        }
    }
}

#[tokio::test]
async fn failed_routes_are_dropped_not_propagated() {
    let failing = (0..3).map(|i| format!("route-{}", i * 2));
    let gate = Arc::new(ScriptedGate::new(failing, GateError::Timeout));

    let orchestrator = CollectionOrchestrator::new(Arc::clone(&gate), dummy_catalog(10)).with_limits(5, 20, Duration::ZERO);
    let outcome = orchestrator.collect(tuesday_morning()).await;

    assert_eq!(outcome.records.len(), 7);
    assert_eq!(outcome.dropped, 3);
}

#[tokio::test]
async fn all_failing_cycle_still_succeeds_empty() {
    let failing = (0..4).map(|i| format!("route-{}", i));
    let gate = Arc::new(ScriptedGate::new(failing, GateError::NoRouteFound));

    let orchestrator = CollectionOrchestrator::new(gate, dummy_catalog(4)).with_limits(5, 20, Duration::ZERO);
    let outcome = orchestrator.collect(tuesday_morning()).await;

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.dropped, 4);
}

#[tokio::test]
async fn every_record_carries_its_route_name() {
    let gate = Arc::new(ScriptedGate::all_succeeding());

    let orchestrator = CollectionOrchestrator::new(gate, dummy_catalog(12)).with_limits(5, 4, Duration::ZERO);
    let outcome = orchestrator.collect(tuesday_morning()).await;

    // completion order is unspecified, so compare as sets keyed by route name
    let names: HashSet<String> = outcome.records.iter().map(|r| r.route_name.clone()).collect();
    assert_eq!(names.len(), 12);
    assert!(names.contains("route-0") && names.contains("route-11"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn worker_pool_bounds_in_flight_requests() {
    let gate = Arc::new(ScriptedGate::all_succeeding());

    let orchestrator = CollectionOrchestrator::new(Arc::clone(&gate), dummy_catalog(20)).with_limits(3, 20, Duration::ZERO);
    let outcome = orchestrator.collect(tuesday_morning()).await;

    assert_eq!(outcome.records.len(), 20);
    assert!(gate.max_in_flight.load(Ordering::SeqCst) <= 3);
}

#[tokio::test]
async fn records_reflect_collection_instant() {
    let gate = Arc::new(ScriptedGate::all_succeeding());
    let now = tuesday_morning();

    let orchestrator = CollectionOrchestrator::new(gate, dummy_catalog(3)).with_limits(2, 20, Duration::ZERO);
    let outcome = orchestrator.collect(now).await;

    for record in &outcome.records {
        assert_eq!(record.timestamp, now);
        assert_eq!(record.hour, 8);
        assert!(record.is_rush_hour);
        assert_eq!(record.base_duration_minutes, 5.0);
        // morning rush band times jitter, rounded to two decimals
        assert!(record.multiplier >= 1.3 * 0.95 && record.multiplier <= 1.8 * 1.15);
    }
}
