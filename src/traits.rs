//! Core domain types and seams for the ride matcher.
//!
//! Concrete backends (great-circle, road network) implement
//! [`TravelTimeEstimator`] for idle repositioning.

/// Absolute time in seconds since the Unix epoch.
pub type Timestamp = i64;

/// Geographic coordinate (lat, lng).
pub type Coordinate = (f64, f64);

/// Estimates how long an empty vehicle takes to drive between two points.
pub trait TravelTimeEstimator: Send + Sync {
    /// Travel time in minutes, or `None` if no estimate is available.
    fn travel_minutes(&self, from: Coordinate, to: Coordinate) -> Option<f64>;
}

/// Why a ride ended the run without a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnassignedReason {
    /// No driver's current location connects to the pickup in the graph.
    UnreachableLocation,
    /// Some drivers could reach the pickup, but none had the time free
    /// (or there were no drivers at all).
    NoEligibleDriver,
}

/// Convert fractional minutes into whole seconds.
pub fn minutes_to_seconds(minutes: f64) -> i64 {
    (minutes * 60.0).round() as i64
}
