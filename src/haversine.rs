//! Haversine travel-time estimator (default when no road network is configured).
//!
//! Uses great-circle distance to estimate idle travel time.
//! Less accurate than OSRM (ignores roads) but always available.

use crate::traits::{Coordinate, TravelTimeEstimator};

/// Average driving speed assumed for every driver (15 mph).
pub const DEFAULT_MILES_PER_MINUTE: f64 = 0.25;

/// Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine-based travel-time estimator.
///
/// Estimates travel time using straight-line distance and an assumed speed.
#[derive(Debug, Clone)]
pub struct HaversineEstimator {
    /// Assumed average driving speed in miles per minute.
    pub miles_per_minute: f64,
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        Self {
            miles_per_minute: DEFAULT_MILES_PER_MINUTE,
        }
    }
}

impl HaversineEstimator {
    pub fn new(miles_per_minute: f64) -> Self {
        Self { miles_per_minute }
    }

    /// Great-circle distance between two points in miles.
    pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }

    fn miles_to_minutes(&self, miles: f64) -> f64 {
        miles / self.miles_per_minute
    }
}

impl TravelTimeEstimator for HaversineEstimator {
    fn travel_minutes(&self, from: Coordinate, to: Coordinate) -> Option<f64> {
        if self.miles_per_minute <= 0.0 {
            return None;
        }
        Some(self.miles_to_minutes(Self::haversine_miles(from, to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOWNTOWN_MANHATTAN: Coordinate = (40.7128, -74.0060);
    const EAST_VILLAGE: Coordinate = (40.7306, -73.9352);

    #[test]
    fn test_haversine_same_point() {
        let dist = HaversineEstimator::haversine_miles(DOWNTOWN_MANHATTAN, DOWNTOWN_MANHATTAN);
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Downtown Manhattan to East Village is ~3.9 miles as the crow flies.
        let dist = HaversineEstimator::haversine_miles(DOWNTOWN_MANHATTAN, EAST_VILLAGE);
        assert!((dist - 3.9).abs() < 0.05, "expected ~3.9 miles, got {}", dist);
    }

    #[test]
    fn test_haversine_symmetric() {
        let there = HaversineEstimator::haversine_miles(DOWNTOWN_MANHATTAN, EAST_VILLAGE);
        let back = HaversineEstimator::haversine_miles(EAST_VILLAGE, DOWNTOWN_MANHATTAN);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_reasonable_travel_time() {
        let estimator = HaversineEstimator::new(0.25); // 15 mph
        // 10 miles at a quarter mile per minute = 40 minutes
        assert_eq!(estimator.miles_to_minutes(10.0), 40.0);
    }

    #[test]
    fn test_non_positive_speed_has_no_estimate() {
        let estimator = HaversineEstimator::new(0.0);
        assert_eq!(estimator.travel_minutes(DOWNTOWN_MANHATTAN, EAST_VILLAGE), None);
    }
}
