//! ride-matcher core
//!
//! Availability-aware assignment of ride requests to drivers: per-driver
//! interval trees of free time, a location graph for travel estimates, and a
//! greedy matcher that ties them together.

pub mod traits;
pub mod error;
pub mod interval_tree;
pub mod driver;
pub mod ride;
pub mod graph;
pub mod shortest_path;
pub mod matcher;
pub mod haversine;
pub mod osrm;
pub mod scenario;
pub mod report;
