use std::collections::HashSet;

use traffic_collector::catalog::{abuja_catalog, Route, RouteCatalog};

#[test]
fn abuja_catalog_names_are_unique() {
    let catalog = abuja_catalog();
    let names: HashSet<&str> = catalog.routes().iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names.len(), catalog.len());
    assert!(catalog.len() > 50);
}

#[test]
fn abuja_catalog_coordinates_are_plausible() {
    // everything sits in the FCT bounding box
    for route in abuja_catalog().routes() {
        for (lon, lat) in [route.origin, route.destination] {
            assert!((6.9..7.9).contains(&lon), "{}: lon {}", route.name, lon);
            assert!((8.6..9.3).contains(&lat), "{}: lat {}", route.name, lat);
        }
    }
}

#[test]
fn abuja_catalog_labels_are_non_empty() {
    for route in abuja_catalog().routes() {
        assert!(!route.origin_label.is_empty());
        assert!(!route.dest_label.is_empty());
    }
}

#[test]
#[should_panic(expected = "unique")]
fn duplicate_route_names_are_rejected() {
    let duplicate = Route {
        name: "Kubwa to CBD".to_string(),
        origin: (7.4898, 9.0765),
        destination: (7.4951, 9.0579),
        origin_label: "Kubwa".to_string(),
        dest_label: "CBD".to_string(),
    };
    RouteCatalog::new(vec![duplicate.clone(), duplicate]);
}
