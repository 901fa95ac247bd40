//! Greedy ride-to-driver matching.
//!
//! Rides are handled one at a time in pickup order. For each ride every driver
//! is scored by how long they need to reach the pickup from where they are
//! now; drivers that cannot reach it, or whose free time does not cover the
//! trip plus the approach, are skipped. The closest driver wins, the cheaper
//! one on an exact tie. Past assignments are never revisited, so an early
//! ride can take the driver a later ride would have preferred.

use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;

use crate::driver::Driver;
use crate::error::MatchError;
use crate::graph::LocationGraph;
use crate::interval_tree::Interval;
use crate::ride::Ride;
use crate::shortest_path::travel_minutes;
use crate::traits::{TravelTimeEstimator, UnassignedReason, minutes_to_seconds};

#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    /// Estimate idle legs and score drivers on the rayon pool.
    pub parallel: bool,
}

/// Rides given to one driver, in the order they were assigned.
#[derive(Debug, Clone)]
pub struct DriverSchedule {
    pub driver_id: String,
    pub rides: Vec<Ride>,
    /// Windows removed from the driver's free time, one per ride.
    pub reserved_windows: Vec<Interval>,
    /// Sum of the approach times to every assigned pickup.
    pub total_travel_minutes: f64,
}

#[derive(Debug, Clone)]
pub struct UnassignedRide {
    pub ride: Ride,
    pub reason: UnassignedReason,
}

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// The graph travel times were estimated on.
    pub graph: LocationGraph,
    /// One entry per driver, in input order, including drivers with no rides.
    pub schedules: Vec<DriverSchedule>,
    pub unassigned: Vec<UnassignedRide>,
}

impl MatchOutcome {
    pub fn rides_for(&self, driver_id: &str) -> Option<&[Ride]> {
        self.schedules
            .iter()
            .find(|schedule| schedule.driver_id == driver_id)
            .map(|schedule| schedule.rides.as_slice())
    }

    /// Driver id to assigned rides.
    pub fn assignment_map(&self) -> HashMap<&str, &[Ride]> {
        self.schedules
            .iter()
            .map(|schedule| (schedule.driver_id.as_str(), schedule.rides.as_slice()))
            .collect()
    }

    pub fn assigned_count(&self) -> usize {
        self.schedules.iter().map(|schedule| schedule.rides.len()).sum()
    }
}

/// A driver that could take the ride.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    driver_index: usize,
    travel_minutes: f64,
    hourly_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ineligible {
    UnreachableLocation,
    Unavailable,
}

/// Assigns rides to drivers and returns the per-driver schedules.
///
/// Drivers are mutated in place: each assignment removes the ride's window
/// from the driver's free time and moves the driver to the drop-off.
pub fn assign_rides<E>(
    rides: &[Ride],
    drivers: &mut [Driver],
    estimator: &E,
    options: &MatchOptions,
) -> Result<MatchOutcome, MatchError>
where
    E: TravelTimeEstimator,
{
    let graph = LocationGraph::build(rides, drivers, estimator, options.parallel);

    let mut schedules: Vec<DriverSchedule> = drivers
        .iter()
        .map(|driver| DriverSchedule {
            driver_id: driver.id().to_string(),
            rides: Vec::new(),
            reserved_windows: Vec::new(),
            total_travel_minutes: 0.0,
        })
        .collect();
    let mut unassigned = Vec::new();

    let mut ordered: Vec<&Ride> = rides.iter().collect();
    ordered.sort_by_key(|ride| ride.pickup_time);

    for ride in ordered {
        let scores = score_drivers(ride, drivers, &graph, options.parallel);
        let best = scores
            .iter()
            .filter_map(|score| score.ok())
            .min_by(compare_candidates);

        let Some(best) = best else {
            let reason = if !scores.is_empty()
                && scores
                    .iter()
                    .all(|score| matches!(score, Err(Ineligible::UnreachableLocation)))
            {
                UnassignedReason::UnreachableLocation
            } else {
                UnassignedReason::NoEligibleDriver
            };
            tracing::warn!(
                pickup_time = ride.pickup_time,
                pickup = ?ride.pickup_location,
                ?reason,
                "ride not assigned"
            );
            unassigned.push(UnassignedRide {
                ride: ride.clone(),
                reason,
            });
            continue;
        };

        let driver = &mut drivers[best.driver_index];
        driver.reserve_interval(ride.pickup_time, ride.end_time())?;
        driver.set_location(ride.dropoff_location);

        tracing::debug!(
            driver = driver.id(),
            pickup_time = ride.pickup_time,
            travel_minutes = best.travel_minutes,
            "assigned ride"
        );

        let schedule = &mut schedules[best.driver_index];
        schedule.rides.push(ride.clone());
        schedule.reserved_windows.push(Interval {
            low: ride.pickup_time,
            high: ride.end_time(),
        });
        schedule.total_travel_minutes += best.travel_minutes;
    }

    let outcome = MatchOutcome {
        graph,
        schedules,
        unassigned,
    };
    tracing::info!(
        rides = rides.len(),
        drivers = drivers.len(),
        assigned = outcome.assigned_count(),
        unassigned = outcome.unassigned.len(),
        "matching run complete"
    );
    Ok(outcome)
}

/// Scores every driver for `ride`. Only reads driver state.
fn score_drivers(
    ride: &Ride,
    drivers: &[Driver],
    graph: &LocationGraph,
    parallel: bool,
) -> Vec<Result<Candidate, Ineligible>> {
    let score = |(driver_index, driver): (usize, &Driver)| {
        score_driver(ride, driver_index, driver, graph)
    };
    if parallel {
        drivers.par_iter().enumerate().map(score).collect()
    } else {
        drivers.iter().enumerate().map(score).collect()
    }
}

fn score_driver(
    ride: &Ride,
    driver_index: usize,
    driver: &Driver,
    graph: &LocationGraph,
) -> Result<Candidate, Ineligible> {
    let travel = travel_minutes(graph, driver.location(), ride.pickup_location)
        .ok_or(Ineligible::UnreachableLocation)?;

    // The approach must fit in the same free window as the ride itself.
    let departure = ride.pickup_time - minutes_to_seconds(travel);
    if !driver.has_available_intervals(departure, ride.end_time()) {
        return Err(Ineligible::Unavailable);
    }

    Ok(Candidate {
        driver_index,
        travel_minutes: travel,
        hourly_rate: driver.hourly_rate(),
    })
}

/// Closest first, then cheapest, then earliest in the driver list.
fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    a.travel_minutes
        .total_cmp(&b.travel_minutes)
        .then_with(|| a.hourly_rate.total_cmp(&b.hourly_rate))
        .then_with(|| a.driver_index.cmp(&b.driver_index))
}
