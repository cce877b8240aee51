use std::collections::HashSet;

/// Coordinate pair in (longitude, latitude) order, as expected by OSRM.
pub type Coords = (f64, f64);

/// A named origin-destination pair, the unit of collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub name: String,
    pub origin: Coords,
    pub destination: Coords,
    pub origin_label: String,
    pub dest_label: String,
}

/// Immutable registry of all routes monitored by the collector.
///
/// Built once at startup; route names are unique within the catalog.
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    routes: Vec<Route>,
}

impl RouteCatalog {
    pub fn new(routes: Vec<Route>) -> Self {
        let names = routes.iter().map(|r| r.name.as_str()).collect::<HashSet<&str>>();
        assert_eq!(names.len(), routes.len(), "route names must be unique within the catalog");

        debug_assert!(routes
            .iter()
            .all(|r| valid_coords(r.origin) && valid_coords(r.destination)));

        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn valid_coords((lon, lat): Coords) -> bool {
    (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
}

fn route(name: &str, origin: Coords, destination: Coords, origin_label: &str, dest_label: &str) -> Route {
    Route {
        name: name.to_string(),
        origin,
        destination,
        origin_label: origin_label.to_string(),
        dest_label: dest_label.to_string(),
    }
}

/// The fixed Abuja route table: express corridors, inner-city connections and
/// peripheral commuter routes.
pub fn abuja_catalog() -> RouteCatalog {
    RouteCatalog::new(vec![
        // major express routes
        route("Kubwa to CBD", (7.4898, 9.0765), (7.4951, 9.0579), "Kubwa", "Central Business District"),
        route("Nyanya to Wuse", (7.6544, 9.0390), (7.4951, 9.0579), "Nyanya", "Wuse 2"),
        route("Airport to Maitama", (7.2630, 9.0068), (7.4902, 9.0820), "Airport Road", "Maitama"),
        route("Lugbe to Area 1", (7.3749, 8.8645), (7.4892, 9.0486), "Lugbe", "Area 1"),
        route("Kuje to Central", (7.2252, 8.8818), (7.4892, 9.0486), "Kuje", "Central Area"),
        route("Gwagwalada to City Gate", (7.0844, 8.9422), (7.4892, 9.0486), "Gwagwalada", "City Gate"),
        // Wuse / Maitama / Asokoro area
        route("Wuse to CBD", (7.4690, 9.0614), (7.4951, 9.0579), "Wuse Market", "Central Business District"),
        route("Maitama to Wuse", (7.4902, 9.0820), (7.4690, 9.0614), "Maitama", "Wuse"),
        route("Asokoro to Wuse", (7.5266, 9.0450), (7.4690, 9.0614), "Asokoro", "Wuse"),
        route("Asokoro to Maitama", (7.5266, 9.0450), (7.4902, 9.0820), "Asokoro", "Maitama"),
        route("CBD to Maitama", (7.4951, 9.0579), (7.4902, 9.0820), "CBD", "Maitama"),
        // Garki / Area routes
        route("Garki to CBD", (7.4860, 9.0333), (7.4951, 9.0579), "Garki", "CBD"),
        route("Area 1 to Garki", (7.4892, 9.0486), (7.4860, 9.0333), "Area 1", "Garki"),
        route("Area 2 to Garki", (7.4950, 9.0450), (7.4860, 9.0333), "Area 2", "Garki"),
        route("Area 3 to CBD", (7.5010, 9.0420), (7.4951, 9.0579), "Area 3", "CBD"),
        route("Garki to Wuse", (7.4860, 9.0333), (7.4690, 9.0614), "Garki", "Wuse"),
        // Gwarinpa / Dutse / Kubwa
        route("Gwarinpa to CBD", (7.4155, 9.1130), (7.4951, 9.0579), "Gwarinpa", "CBD"),
        route("Dutse to Gwarinpa", (7.4336, 9.0765), (7.4155, 9.1130), "Dutse", "Gwarinpa"),
        route("Kubwa to Gwarinpa", (7.4898, 9.0765), (7.4155, 9.1130), "Kubwa", "Gwarinpa"),
        route("Dutse to CBD", (7.4336, 9.0765), (7.4951, 9.0579), "Dutse", "CBD"),
        route("Dutse to Wuse", (7.4336, 9.0765), (7.4690, 9.0614), "Dutse", "Wuse"),
        route("Gwarinpa to Wuse", (7.4155, 9.1130), (7.4690, 9.0614), "Gwarinpa", "Wuse"),
        // Jabi / Utako / Wuye
        route("Jabi to CBD", (7.4569, 9.0530), (7.4951, 9.0579), "Jabi", "CBD"),
        route("Utako to Jabi", (7.4422, 9.0704), (7.4569, 9.0530), "Utako", "Jabi"),
        route("Utako to CBD", (7.4422, 9.0704), (7.4951, 9.0579), "Utako", "CBD"),
        route("Wuye to Jabi", (7.4490, 9.0850), (7.4569, 9.0530), "Wuye", "Jabi"),
        route("Utako to Wuse", (7.4422, 9.0704), (7.4690, 9.0614), "Utako", "Wuse"),
        route("Jabi to Wuse", (7.4569, 9.0530), (7.4690, 9.0614), "Jabi", "Wuse"),
        // Karu / Nyanya / Maraba
        route("Nyanya to Karu", (7.6544, 9.0390), (7.6830, 8.9950), "Nyanya", "Karu"),
        route("Karu to CBD", (7.6830, 8.9950), (7.4951, 9.0579), "Karu", "CBD"),
        route("Karu to Garki", (7.6830, 8.9950), (7.4860, 9.0333), "Karu", "Garki"),
        route("Nyanya to Garki", (7.6544, 9.0390), (7.4860, 9.0333), "Nyanya", "Garki"),
        route("Maraba to Nyanya", (7.7345, 8.9513), (7.6544, 9.0390), "Maraba", "Nyanya"),
        // Lugbe / Airport Road corridor
        route("Lugbe to Airport", (7.3749, 8.8645), (7.2630, 9.0068), "Lugbe", "Airport Road"),
        route("Airport to CBD", (7.2630, 9.0068), (7.4951, 9.0579), "Airport Road", "CBD"),
        route("Lugbe to CBD", (7.3749, 8.8645), (7.4951, 9.0579), "Lugbe", "CBD"),
        route("Lugbe to Garki", (7.3749, 8.8645), (7.4860, 9.0333), "Lugbe", "Garki"),
        // Kuje / Gwagwalada
        route("Kuje to Gwagwalada", (7.2252, 8.8818), (7.0844, 8.9422), "Kuje", "Gwagwalada"),
        route("Gwagwalada to CBD", (7.0844, 8.9422), (7.4951, 9.0579), "Gwagwalada", "CBD"),
        route("Kuje to Lugbe", (7.2252, 8.8818), (7.3749, 8.8645), "Kuje", "Lugbe"),
        // Lokogoma / Apo / Gudu
        route("Lokogoma to Garki", (7.4620, 8.9920), (7.4860, 9.0333), "Lokogoma", "Garki"),
        route("Apo to Lokogoma", (7.4520, 8.9850), (7.4620, 8.9920), "Apo", "Lokogoma"),
        route("Gudu to Garki", (7.4350, 9.0100), (7.4860, 9.0333), "Gudu", "Garki"),
        route("Lokogoma to CBD", (7.4620, 8.9920), (7.4951, 9.0579), "Lokogoma", "CBD"),
        route("Galadimawa to Garki", (7.4520, 9.0150), (7.4860, 9.0333), "Galadimawa", "Garki"),
        // Mararaba / Masaka / Karshi
        route("Maraba to CBD", (7.7345, 8.9513), (7.4951, 9.0579), "Maraba", "CBD"),
        route("Karshi to Kuje", (7.6234, 8.7512), (7.2252, 8.8818), "Karshi", "Kuje"),
        route("Masaka to Lugbe", (7.5820, 8.8330), (7.3749, 8.8645), "Masaka", "Lugbe"),
        // Life Camp / Jikwoyi / Kurudu
        route("Life Camp to Utako", (7.4225, 9.0925), (7.4422, 9.0704), "Life Camp", "Utako"),
        route("Jikwoyi to Garki", (7.5510, 9.0140), (7.4860, 9.0333), "Jikwoyi", "Garki"),
        route("Kurudu to Nyanya", (7.5890, 8.9820), (7.6544, 9.0390), "Kurudu", "Nyanya"),
        // Mpape / Bwari
        route("Mpape to Gwarinpa", (7.4110, 9.1350), (7.4155, 9.1130), "Mpape", "Gwarinpa"),
        route("Bwari to Mpape", (7.3850, 9.1850), (7.4110, 9.1350), "Bwari", "Mpape"),
        route("Bwari to CBD", (7.3850, 9.1850), (7.4951, 9.0579), "Bwari", "CBD"),
        // Katampe / Jahi
        route("Katampe to Maitama", (7.4380, 9.0950), (7.4902, 9.0820), "Katampe", "Maitama"),
        route("Jahi to Wuse", (7.4520, 9.0880), (7.4690, 9.0614), "Jahi", "Wuse"),
        route("Katampe to Jabi", (7.4380, 9.0950), (7.4569, 9.0530), "Katampe", "Jabi"),
        // Berger / Kado
        route("Berger to Garki", (7.4473, 9.0375), (7.4860, 9.0333), "Berger", "Garki"),
        route("Kado to Berger", (7.4640, 9.0280), (7.4473, 9.0375), "Kado", "Berger"),
        // cross-city commuter routes
        route("Kubwa to Nyanya", (7.4898, 9.0765), (7.6544, 9.0390), "Kubwa", "Nyanya"),
        route("Gwarinpa to Lugbe", (7.4155, 9.1130), (7.3749, 8.8645), "Gwarinpa", "Lugbe"),
        route("Maitama to Garki", (7.4902, 9.0820), (7.4860, 9.0333), "Maitama", "Garki"),
        route("Jabi to Asokoro", (7.4569, 9.0530), (7.5266, 9.0450), "Jabi", "Asokoro"),
        // Wuse zone extensions
        route("Wuse to Jabi", (7.4690, 9.0614), (7.4569, 9.0530), "Wuse", "Jabi"),
        route("Wuse to Utako", (7.4690, 9.0614), (7.4422, 9.0704), "Wuse", "Utako"),
        route("Wuse to Garki", (7.4690, 9.0614), (7.4860, 9.0333), "Wuse", "Garki"),
        route("Maitama to Asokoro", (7.4902, 9.0820), (7.5266, 9.0450), "Maitama", "Asokoro"),
        route("Maitama to Jabi", (7.4902, 9.0820), (7.4569, 9.0530), "Maitama", "Jabi"),
        route("Asokoro to CBD", (7.5266, 9.0450), (7.4951, 9.0579), "Asokoro", "CBD"),
        route("Asokoro to Garki", (7.5266, 9.0450), (7.4860, 9.0333), "Asokoro", "Garki"),
        route("Gwarinpa to Dutse", (7.4155, 9.1130), (7.4336, 9.0765), "Gwarinpa", "Dutse"),
        route("Gwarinpa to Kubwa", (7.4155, 9.1130), (7.4898, 9.0765), "Gwarinpa", "Kubwa"),
        route("Kubwa to Dutse", (7.4898, 9.0765), (7.4336, 9.0765), "Kubwa", "Dutse"),
        route("Kubwa to Wuse", (7.4898, 9.0765), (7.4690, 9.0614), "Kubwa", "Wuse"),
        route("Nyanya to Maraba", (7.6544, 9.0390), (7.7345, 8.9513), "Nyanya", "Maraba"),
        route("Karu to Maraba", (7.6830, 8.9950), (7.7345, 8.9513), "Karu", "Maraba"),
        route("Lugbe to Lokogoma", (7.3749, 8.8645), (7.4620, 8.9920), "Lugbe", "Lokogoma"),
        route("Lugbe to Apo", (7.3749, 8.8645), (7.4520, 8.9850), "Lugbe", "Apo"),
        route("Mpape to Bwari", (7.4110, 9.1350), (7.3850, 9.1850), "Mpape", "Bwari"),
        route("Life Camp to Gwarinpa", (7.4225, 9.0925), (7.4155, 9.1130), "Life Camp", "Gwarinpa"),
        // short inner-city hops
        route("Garki to Area 1", (7.4860, 9.0333), (7.4892, 9.0486), "Garki", "Area 1"),
        route("Area 1 to Area 2", (7.4892, 9.0486), (7.4950, 9.0450), "Area 1", "Area 2"),
        route("Area 2 to Area 3", (7.4950, 9.0450), (7.5010, 9.0420), "Area 2", "Area 3"),
        route("Utako to Wuye", (7.4422, 9.0704), (7.4490, 9.0850), "Utako", "Wuye"),
    ])
}
