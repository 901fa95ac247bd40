//! Plain-text rendering of a matching run.

use std::fmt::Write;

use chrono::DateTime;

use crate::matcher::MatchOutcome;
use crate::traits::{Timestamp, UnassignedReason};

/// One block per driver, followed by any rides left without a driver.
pub fn render(outcome: &MatchOutcome) -> String {
    let mut out = String::new();

    for schedule in &outcome.schedules {
        if schedule.rides.is_empty() {
            let _ = writeln!(out, "Driver {} hasn't been assigned to any rides.", schedule.driver_id);
            continue;
        }
        let _ = writeln!(out, "Driver {} has been assigned the following rides:", schedule.driver_id);
        for ride in &schedule.rides {
            let _ = writeln!(
                out,
                "  Pickup at {} from {} to {}",
                format_time(ride.pickup_time),
                describe(&ride.pickup_address, ride.pickup_location),
                describe(&ride.dropoff_address, ride.dropoff_location),
            );
        }
    }

    for unassigned in &outcome.unassigned {
        let reason = match unassigned.reason {
            UnassignedReason::UnreachableLocation => "no driver can reach the pickup",
            UnassignedReason::NoEligibleDriver => "no driver is free",
        };
        let _ = writeln!(
            out,
            "Ride at {} from {} was not assigned: {}",
            format_time(unassigned.ride.pickup_time),
            describe(&unassigned.ride.pickup_address, unassigned.ride.pickup_location),
            reason,
        );
    }

    out
}

/// UTC wall-clock time; raw seconds if out of chrono's range.
pub fn format_time(timestamp: Timestamp) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

fn describe(address: &str, location: (f64, f64)) -> String {
    if address.is_empty() {
        format!("({}, {})", location.0, location.1)
    } else {
        format!("{} ({}, {})", address, location.0, location.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LocationGraph;
    use crate::matcher::{DriverSchedule, UnassignedRide};
    use crate::ride::Ride;

    #[test]
    fn test_render_lists_every_driver() {
        let ride = Ride::new(3600, (1.0, 2.0), (3.0, 4.0), 10).with_addresses("Home", "Work");
        let outcome = MatchOutcome {
            graph: LocationGraph::new(),
            schedules: vec![
                DriverSchedule {
                    driver_id: "driver_1".to_string(),
                    rides: Vec::new(),
                    reserved_windows: Vec::new(),
                    total_travel_minutes: 0.0,
                },
                DriverSchedule {
                    driver_id: "driver_2".to_string(),
                    rides: vec![ride.clone()],
                    reserved_windows: Vec::new(),
                    total_travel_minutes: 0.0,
                },
            ],
            unassigned: vec![UnassignedRide {
                ride: Ride::new(7200, (5.0, 6.0), (7.0, 8.0), 5),
                reason: UnassignedReason::NoEligibleDriver,
            }],
        };

        let text = render(&outcome);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Driver driver_1 hasn't been assigned to any rides.",
                "Driver driver_2 has been assigned the following rides:",
                "  Pickup at 1970-01-01 01:00:00 from Home (1, 2) to Work (3, 4)",
                "Ride at 1970-01-01 02:00:00 from (5, 6) was not assigned: no driver is free",
            ]
        );
    }

    #[test]
    fn test_format_time_is_utc_wall_clock() {
        assert_eq!(format_time(1_724_925_600), "2024-08-29 10:00:00");
        assert_eq!(format_time(i64::MAX), i64::MAX.to_string());
    }
}
