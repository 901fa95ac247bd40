//! Ride requests.

use serde::Deserialize;

use crate::traits::{Coordinate, Timestamp};

/// A single transportation request. Immutable once created.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ride {
    pub pickup_time: Timestamp,
    pub pickup_location: Coordinate,
    #[serde(default)]
    pub pickup_address: String,
    pub dropoff_location: Coordinate,
    #[serde(default)]
    pub dropoff_address: String,
    /// Estimated ride duration in minutes.
    pub estimated_duration: u32,
}

impl Ride {
    pub fn new(
        pickup_time: Timestamp,
        pickup_location: Coordinate,
        dropoff_location: Coordinate,
        estimated_duration: u32,
    ) -> Self {
        Self {
            pickup_time,
            pickup_location,
            pickup_address: String::new(),
            dropoff_location,
            dropoff_address: String::new(),
            estimated_duration,
        }
    }

    pub fn with_addresses(mut self, pickup: impl Into<String>, dropoff: impl Into<String>) -> Self {
        self.pickup_address = pickup.into();
        self.dropoff_address = dropoff.into();
        self
    }

    /// When the passenger is expected to be dropped off.
    pub fn end_time(&self) -> Timestamp {
        self.pickup_time + i64::from(self.estimated_duration) * 60
    }
}
