//! Single-pair shortest travel time over a [`LocationGraph`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::graph::LocationGraph;
use crate::traits::Coordinate;

/// Minimal-cost path between two locations.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub minutes: f64,
    /// Locations visited, from source to target inclusive.
    pub hops: Vec<Coordinate>,
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    minutes: f64,
    node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by cost.
        other
            .minutes
            .total_cmp(&self.minutes)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest travel time in minutes from `from` to `to`.
///
/// Returns `None` if either location is unknown or `to` cannot be reached.
pub fn travel_minutes(graph: &LocationGraph, from: Coordinate, to: Coordinate) -> Option<f64> {
    let source = graph.node_index(from)?;
    let target = graph.node_index(to)?;
    dijkstra(graph, source, target).map(|(minutes, _)| minutes)
}

/// Like [`travel_minutes`], also reporting the locations along the path.
pub fn shortest_path(graph: &LocationGraph, from: Coordinate, to: Coordinate) -> Option<ShortestPath> {
    let source = graph.node_index(from)?;
    let target = graph.node_index(to)?;
    let (minutes, previous) = dijkstra(graph, source, target)?;

    let mut hops = vec![graph.location(target)];
    let mut node = target;
    while let Some(prev) = previous[node] {
        hops.push(graph.location(prev));
        node = prev;
    }
    hops.reverse();

    Some(ShortestPath { minutes, hops })
}

/// Runs Dijkstra until `target` is settled, returning its cost and the
/// predecessor of every reached node.
fn dijkstra(graph: &LocationGraph, source: usize, target: usize) -> Option<(f64, Vec<Option<usize>>)> {
    let mut distances = vec![f64::INFINITY; graph.len()];
    let mut previous = vec![None; graph.len()];
    let mut visited = HashSet::new();
    let mut queue = BinaryHeap::new();

    distances[source] = 0.0;
    queue.push(QueueEntry {
        minutes: 0.0,
        node: source,
    });

    while let Some(QueueEntry { minutes, node }) = queue.pop() {
        if !visited.insert(node) {
            continue;
        }
        if node == target {
            return Some((minutes, previous));
        }
        if minutes > distances[node] {
            continue;
        }

        for edge in graph.edges(node) {
            let candidate = minutes + edge.minutes;
            if candidate < distances[edge.to] {
                distances[edge.to] = candidate;
                previous[edge.to] = Some(node);
                queue.push(QueueEntry {
                    minutes: candidate,
                    node: edge.to,
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeKind;

    const A: Coordinate = (0.0, 0.0);
    const B: Coordinate = (0.0, 1.0);
    const C: Coordinate = (1.0, 1.0);
    const D: Coordinate = (1.0, 0.0);
    const ISLAND: Coordinate = (5.0, 5.0);

    ///   A --4--> B --1--> C
    ///   A --1--> D --2--> C
    ///   C --7--> A
    fn graph() -> LocationGraph {
        let mut graph = LocationGraph::new();
        let [a, b, c, d, _] = [A, B, C, D, ISLAND].map(|loc| graph.add_location(loc));
        graph.add_edge(a, b, 4.0, EdgeKind::Ride);
        graph.add_edge(b, c, 1.0, EdgeKind::Idle);
        graph.add_edge(a, d, 1.0, EdgeKind::Idle);
        graph.add_edge(d, c, 2.0, EdgeKind::Ride);
        graph.add_edge(c, a, 7.0, EdgeKind::Idle);
        graph
    }

    #[test]
    fn test_picks_cheapest_path() {
        let graph = graph();
        assert_eq!(travel_minutes(&graph, A, C), Some(3.0));
        assert_eq!(travel_minutes(&graph, A, B), Some(4.0));
        assert_eq!(travel_minutes(&graph, B, A), Some(8.0));
    }

    #[test]
    fn test_same_location_is_free() {
        assert_eq!(travel_minutes(&graph(), B, B), Some(0.0));
    }

    #[test]
    fn test_edges_are_directed() {
        // D reaches A only through C.
        assert_eq!(travel_minutes(&graph(), D, A), Some(9.0));
    }

    #[test]
    fn test_unreachable_and_unknown_locations() {
        let graph = graph();
        assert_eq!(travel_minutes(&graph, A, ISLAND), None);
        assert_eq!(travel_minutes(&graph, ISLAND, A), None);
        assert_eq!(travel_minutes(&graph, A, (9.0, 9.0)), None);
    }

    #[test]
    fn test_shortest_path_reports_hops() {
        let path = shortest_path(&graph(), A, C).expect("reachable");
        assert_eq!(path.minutes, 3.0);
        assert_eq!(path.hops, vec![A, D, C]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = LocationGraph::new();
        assert_eq!(travel_minutes(&graph, A, B), None);
    }
}
