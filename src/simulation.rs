use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of traffic multipliers, injectable so simulations are reproducible.
pub trait MultiplierDraw {
    /// Draws a factor from the half-open interval `[lo, hi)`.
    fn draw(&mut self, lo: f64, hi: f64) -> f64;
}

/// Production draw source: uniform over the requested range.
pub struct UniformDraw<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformDraw<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MultiplierDraw for UniformDraw<R> {
    fn draw(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.gen_range(lo..hi)
    }
}

/// Replays a fixed sequence of draws, ignoring the requested ranges.
/// Intended for tests that pin the multiplier and jitter exactly.
pub struct ScriptedDraw {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedDraw {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }
}

impl MultiplierDraw for ScriptedDraw {
    fn draw(&mut self, _lo: f64, _hi: f64) -> f64 {
        let val = self.values[self.next % self.values.len()];
        self.next += 1;
        val
    }
}

/// Traffic severity, classified from the simulated delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficStatus {
    #[serde(rename = "No Traffic")]
    NoTraffic,
    #[serde(rename = "Light Traffic")]
    Light,
    #[serde(rename = "Moderate Traffic")]
    Moderate,
    #[serde(rename = "Heavy Traffic")]
    Heavy,
}

impl TrafficStatus {
    /// Bucket boundaries are inclusive on the upper class: a delay of exactly
    /// 5 minutes is `Light`, 15 is `Moderate`, 30 is `Heavy`.
    pub fn from_delay(delay_minutes: f64) -> Self {
        if delay_minutes < 5.0 {
            TrafficStatus::NoTraffic
        } else if delay_minutes < 15.0 {
            TrafficStatus::Light
        } else if delay_minutes < 30.0 {
            TrafficStatus::Moderate
        } else {
            TrafficStatus::Heavy
        }
    }
}

impl fmt::Display for TrafficStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrafficStatus::NoTraffic => "No Traffic",
            TrafficStatus::Light => "Light Traffic",
            TrafficStatus::Moderate => "Moderate Traffic",
            TrafficStatus::Heavy => "Heavy Traffic",
        };
        write!(f, "{}", label)
    }
}

/// Result of one simulation: the scaled duration and the factor that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulated {
    pub duration_minutes: f64,
    pub multiplier: f64,
}

/// Synthesizes a traffic condition for a baseline duration at a given instant.
///
/// The model is a fixed rule table over (hour, day of week): rush hours on
/// weekdays push the multiplier well above 1, quiet weekend hours below it,
/// and a final jitter draw keeps repeated cycles from producing identical
/// values. There is no real traffic feed behind this.
pub struct TrafficSimulator<D: MultiplierDraw> {
    draw: D,
}

impl<D: MultiplierDraw> TrafficSimulator<D> {
    pub fn new(draw: D) -> Self {
        Self { draw }
    }

    pub fn simulate(&mut self, now: NaiveDateTime, base_duration_minutes: f64) -> Simulated {
        let hour = now.hour();
        let weekday = now.weekday();

        let mut multiplier = if is_weekend(weekday) {
            match hour {
                10..=18 => self.draw.draw(1.0, 1.2),
                _ => self.draw.draw(0.8, 1.0),
            }
        } else {
            match hour {
                7..=9 => self.draw.draw(1.3, 1.8),
                17..=19 => self.draw.draw(1.5, 2.0),
                12..=14 => self.draw.draw(1.1, 1.3),
                _ => self.draw.draw(0.9, 1.1),
            }
        };

        // Friday afternoons see early weekend departures on top of the lunch band
        if weekday == Weekday::Fri && (13..=15).contains(&hour) {
            multiplier *= 1.2;
        }

        multiplier *= self.draw.draw(0.95, 1.15);

        Simulated {
            duration_minutes: base_duration_minutes * multiplier,
            multiplier,
        }
    }
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Weekday morning (7-9h) and evening (17-19h) peaks.
pub fn is_rush_hour(weekday: Weekday, hour: u32) -> bool {
    !is_weekend(weekday) && ((7..=9).contains(&hour) || (17..=19).contains(&hour))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_draw_replays_in_order() {
        let mut draw = ScriptedDraw::new(vec![1.6, 1.0]);
        assert_eq!(draw.draw(1.3, 1.8), 1.6);
        assert_eq!(draw.draw(0.95, 1.15), 1.0);
        // wraps around
        assert_eq!(draw.draw(1.3, 1.8), 1.6);
    }

    #[test]
    fn status_display_matches_consumer_vocabulary() {
        assert_eq!(TrafficStatus::NoTraffic.to_string(), "No Traffic");
        assert_eq!(TrafficStatus::Heavy.to_string(), "Heavy Traffic");
    }
}
