//! Drivers and their availability.

use crate::error::MatchError;
use crate::interval_tree::{Interval, IntervalTree};
use crate::traits::{Coordinate, Timestamp};

/// A driver together with the free time they have left.
#[derive(Debug, Clone)]
pub struct Driver {
    id: String,
    hourly_rate: f64,
    location: Coordinate,
    availability: Vec<Interval>,
    free_time: IntervalTree,
}

impl Driver {
    /// Creates a driver from their declared free windows.
    ///
    /// Fails with [`MatchError::InvalidInterval`] if any window is empty or
    /// inverted.
    pub fn new(
        id: impl Into<String>,
        hourly_rate: f64,
        location: Coordinate,
        availability: &[(Timestamp, Timestamp)],
    ) -> Result<Self, MatchError> {
        let availability = availability
            .iter()
            .map(|&(start, end)| Interval::new(start, end))
            .collect::<Result<Vec<_>, _>>()?;
        let free_time = IntervalTree::from_intervals(availability.iter().copied());

        Ok(Self {
            id: id.into(),
            hourly_rate,
            location,
            availability,
            free_time,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    /// Where the driver currently is (start location or last drop-off).
    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn set_location(&mut self, location: Coordinate) {
        self.location = location;
    }

    /// The windows the driver declared before any reservation.
    pub fn availability(&self) -> &[Interval] {
        &self.availability
    }

    /// True if any declared window contains the instant `time` (inclusive).
    pub fn declared_free_at(&self, time: Timestamp) -> bool {
        self.availability
            .iter()
            .any(|window| window.low <= time && time <= window.high)
    }

    pub fn free_time(&self) -> &IntervalTree {
        &self.free_time
    }

    /// True if one remaining free window covers `[start_time, end_time]`.
    pub fn has_available_intervals(&self, start_time: Timestamp, end_time: Timestamp) -> bool {
        self.free_time.is_available(start_time, end_time)
    }

    /// Removes `[start_time, end_time]` from the driver's free time.
    pub fn reserve_interval(
        &mut self,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Result<(), MatchError> {
        let touched = self.free_time.reserve(start_time, end_time)?;
        tracing::trace!(driver = %self.id, start_time, end_time, touched, "reserved interval");
        Ok(())
    }
}
