//! JSON scenario input: the rides and drivers for one matching run.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::driver::Driver;
use crate::error::MatchError;
use crate::ride::Ride;
use crate::traits::{Coordinate, Timestamp};

#[derive(Debug, Clone, Deserialize)]
pub struct DriverSpec {
    pub id: String,
    pub hourly_rate: f64,
    pub location: Coordinate,
    /// Free windows as `[start, end]` timestamp pairs.
    pub availability: Vec<(Timestamp, Timestamp)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub rides: Vec<Ride>,
    pub drivers: Vec<DriverSpec>,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, MatchError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MatchError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Validates the drivers and hands back inputs ready for matching.
    pub fn into_parts(self) -> Result<(Vec<Ride>, Vec<Driver>), MatchError> {
        let mut seen = HashSet::new();
        let mut drivers = Vec::with_capacity(self.drivers.len());
        for entry in self.drivers {
            if !seen.insert(entry.id.clone()) {
                return Err(MatchError::DuplicateDriver(entry.id));
            }
            drivers.push(Driver::new(
                entry.id,
                entry.hourly_rate,
                entry.location,
                &entry.availability,
            )?);
        }
        Ok((self.rides, drivers))
    }
}
