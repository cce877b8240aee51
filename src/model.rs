use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::catalog::Route;
use crate::gate::RouteInfo;
use crate::simulation::{is_rush_hour, is_weekend, Simulated, TrafficStatus};

/// One persisted observation: baseline routing data plus the simulated traffic
/// condition at collection time. Field order is the stable store column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficRecord {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub route_name: String,
    pub origin_label: String,
    pub dest_label: String,
    pub distance_km: f64,
    pub base_duration_minutes: f64,
    pub simulated_duration_minutes: f64,
    pub delay_minutes: f64,
    pub traffic_status: TrafficStatus,
    pub multiplier: f64,
    pub avg_speed_kmh: f64,
    pub is_weekend: bool,
    pub is_rush_hour: bool,
    pub hour: u32,
    pub day_of_week: String,
}

impl TrafficRecord {
    /// Assembles a record from the gate's baseline data and a simulation result.
    pub fn build(route: &Route, info: &RouteInfo, simulated: &Simulated, now: NaiveDateTime) -> Self {
        let distance_km = info.distance_meters / 1000.0;
        let base_minutes = info.duration_seconds / 60.0;
        let delay = (simulated.duration_minutes - base_minutes).max(0.0);

        let avg_speed_kmh = if simulated.duration_minutes > 0.0 {
            distance_km / simulated.duration_minutes * 60.0
        } else {
            0.0
        };

        let weekday = now.weekday();

        Self {
            timestamp: now,
            route_name: route.name.clone(),
            origin_label: route.origin_label.clone(),
            dest_label: route.dest_label.clone(),
            distance_km: round2(distance_km),
            base_duration_minutes: round2(base_minutes),
            simulated_duration_minutes: round2(simulated.duration_minutes),
            delay_minutes: round2(delay),
            traffic_status: TrafficStatus::from_delay(delay),
            multiplier: round2(simulated.multiplier),
            avg_speed_kmh: round2(avg_speed_kmh),
            is_weekend: is_weekend(weekday),
            is_rush_hour: is_rush_hour(weekday, now.hour()),
            hour: now.hour(),
            day_of_week: now.format("%A").to_string(),
        }
    }
}

fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

/// Store timestamps use `YYYY-MM-DD HH:MM:SS`, matching the downstream
/// feature-engineering step's parser.
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&timestamp.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
