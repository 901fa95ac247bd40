//! Location graph used for travel-time estimation.
//!
//! Nodes are every pickup, drop-off and driver start seen in a run. Edges are
//! either real ride legs (weighted by the ride's duration) or idle
//! repositioning legs (weighted by a [`TravelTimeEstimator`]).

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::driver::Driver;
use crate::ride::Ride;
use crate::traits::{Coordinate, TravelTimeEstimator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// A passenger-carrying leg from a ride request.
    Ride,
    /// Driving empty to the next pickup.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: usize,
    pub minutes: f64,
    pub kind: EdgeKind,
}

/// Directed, weighted adjacency over known coordinates.
#[derive(Debug, Clone, Default)]
pub struct LocationGraph {
    locations: Vec<Coordinate>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<Edge>>,
    /// Every `(from, to)` pair joined by at least one edge.
    linked: HashSet<(usize, usize)>,
}

impl LocationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph for one matching run.
    ///
    /// Ride legs are added in both directions first, then idle legs from each
    /// drop-off to every pickup, then idle legs from each driver start to the
    /// pickups the driver declared themselves free for. A pair already joined
    /// by any edge is never joined twice.
    pub fn build<E>(rides: &[Ride], drivers: &[Driver], estimator: &E, parallel: bool) -> Self
    where
        E: TravelTimeEstimator,
    {
        let mut graph = Self::new();

        for ride in rides {
            let pickup = graph.add_location(ride.pickup_location);
            let dropoff = graph.add_location(ride.dropoff_location);
            let minutes = f64::from(ride.estimated_duration);
            graph.add_edge(pickup, dropoff, minutes, EdgeKind::Ride);
            graph.add_edge(dropoff, pickup, minutes, EdgeKind::Ride);
        }

        let mut idle_pairs = Vec::new();
        for dropoff in rides.iter().map(|ride| ride.dropoff_location) {
            for pickup in rides.iter().map(|ride| ride.pickup_location) {
                idle_pairs.push((dropoff, pickup));
            }
        }
        graph.add_idle_edges(&idle_pairs, estimator, parallel);

        let mut start_pairs = Vec::new();
        for driver in drivers {
            graph.add_location(driver.location());
            for ride in rides {
                if driver.declared_free_at(ride.pickup_time) {
                    start_pairs.push((driver.location(), ride.pickup_location));
                }
            }
        }
        graph.add_idle_edges(&start_pairs, estimator, parallel);

        tracing::debug!(
            locations = graph.len(),
            edges = graph.edge_count(),
            "built location graph"
        );
        graph
    }

    /// Estimates and inserts idle edges for the pairs not yet connected.
    fn add_idle_edges<E>(&mut self, pairs: &[(Coordinate, Coordinate)], estimator: &E, parallel: bool)
    where
        E: TravelTimeEstimator,
    {
        let mut queued = HashSet::new();
        let mut pending: Vec<(usize, usize)> = Vec::new();
        for &(from, to) in pairs {
            let from = self.add_location(from);
            let to = self.add_location(to);
            if from == to || self.has_edge(from, to) || !queued.insert((from, to)) {
                continue;
            }
            pending.push((from, to));
        }

        let locations = &self.locations;
        let estimate = |&(from, to): &(usize, usize)| {
            estimator.travel_minutes(locations[from], locations[to])
        };
        let estimates: Vec<Option<f64>> = if parallel {
            pending.par_iter().map(estimate).collect()
        } else {
            pending.iter().map(estimate).collect()
        };

        for ((from, to), minutes) in pending.into_iter().zip(estimates) {
            match minutes {
                Some(minutes) => self.add_edge(from, to, minutes, EdgeKind::Idle),
                None => tracing::debug!(
                    from = ?self.locations[from],
                    to = ?self.locations[to],
                    "no travel estimate, skipping idle edge"
                ),
            }
        }
    }

    /// Returns the node index for `location`, adding it if unseen.
    pub fn add_location(&mut self, location: Coordinate) -> usize {
        let key = location_key(location);
        if let Some(&index) = self.index.get(&key) {
            return index;
        }
        let index = self.locations.len();
        self.index.insert(key, index);
        self.locations.push(location);
        self.adjacency.push(Vec::new());
        index
    }

    pub fn add_edge(&mut self, from: usize, to: usize, minutes: f64, kind: EdgeKind) {
        self.adjacency[from].push(Edge { to, minutes, kind });
        self.linked.insert((from, to));
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.linked.contains(&(from, to))
    }

    pub fn node_index(&self, location: Coordinate) -> Option<usize> {
        self.index.get(&location_key(location)).copied()
    }

    pub fn contains(&self, location: Coordinate) -> bool {
        self.node_index(location).is_some()
    }

    pub fn location(&self, index: usize) -> Coordinate {
        self.locations[index]
    }

    pub fn locations(&self) -> &[Coordinate] {
        &self.locations
    }

    /// Outgoing edges of the node at `index`.
    pub fn edges(&self, index: usize) -> &[Edge] {
        &self.adjacency[index]
    }

    /// Outgoing edges of `location`, as `(neighbor, minutes)` pairs.
    pub fn neighbors(&self, location: Coordinate) -> Vec<(Coordinate, f64)> {
        self.node_index(location)
            .map(|index| {
                self.adjacency[index]
                    .iter()
                    .map(|edge| (self.locations[edge.to], edge.minutes))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

/// Six-decimal key; anything that rounds to zero keys as `0.000000`.
pub(crate) fn location_key(location: Coordinate) -> String {
    format!("{},{}", key_component(location.0), key_component(location.1))
}

fn key_component(value: f64) -> String {
    let text = format!("{:.6}", value);
    if text == "-0.000000" {
        "0.000000".to_string()
    } else {
        text
    }
}
