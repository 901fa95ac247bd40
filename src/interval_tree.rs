//! Augmented interval tree over a driver's free time.
//!
//! Every node stores one free window `[low, high)` plus the largest `high`
//! found in its subtree, which lets queries skip left subtrees that end
//! before the query starts. Nodes own their children; there are no parent
//! links, so every structural change is done by taking a subtree out,
//! rebuilding it and handing it back.

use std::cmp::Ordering;

use crate::error::MatchError;
use crate::traits::Timestamp;

/// A half-open time window `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub low: Timestamp,
    pub high: Timestamp,
}

impl Interval {
    /// Creates an interval, rejecting empty or inverted windows.
    pub fn new(low: Timestamp, high: Timestamp) -> Result<Self, MatchError> {
        if low >= high {
            return Err(MatchError::InvalidInterval { low, high });
        }
        Ok(Self { low, high })
    }

    /// True if `[low, high]` lies entirely inside this interval.
    pub fn contains(&self, low: Timestamp, high: Timestamp) -> bool {
        self.low <= low && high <= self.high
    }

    /// Inclusive overlap test; windows that only touch count as overlapping.
    pub fn overlaps(&self, low: Timestamp, high: Timestamp) -> bool {
        self.low <= high && low <= self.high
    }
}

#[derive(Debug, Clone)]
struct Node {
    low: Timestamp,
    high: Timestamp,
    max: Timestamp,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(low: Timestamp, high: Timestamp) -> Self {
        Self {
            low,
            high,
            max: high,
            left: None,
            right: None,
        }
    }

    fn interval(&self) -> Interval {
        Interval {
            low: self.low,
            high: self.high,
        }
    }

    fn refresh_max(&mut self) {
        let mut max = self.high;
        if let Some(left) = &self.left {
            max = max.max(left.max);
        }
        if let Some(right) = &self.right {
            max = max.max(right.max);
        }
        self.max = max;
    }
}

/// Free windows of a single driver.
#[derive(Debug, Clone, Default)]
pub struct IntervalTree {
    root: Option<Box<Node>>,
    len: usize,
}

impl IntervalTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from already validated free windows.
    pub(crate) fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut tree = Self::new();
        for interval in intervals {
            tree.insert_unchecked(interval.low, interval.high);
        }
        tree
    }

    /// Inserts a free window `[low, high)`.
    pub fn insert(&mut self, low: Timestamp, high: Timestamp) -> Result<(), MatchError> {
        let interval = Interval::new(low, high)?;
        self.insert_unchecked(interval.low, interval.high);
        Ok(())
    }

    fn insert_unchecked(&mut self, low: Timestamp, high: Timestamp) {
        self.root = Some(insert_node(self.root.take(), low, high));
        self.len += 1;
    }

    /// True iff a single stored window fully contains `[low, high]`.
    ///
    /// Adjacent windows are not merged: a request straddling the boundary
    /// between two free windows is reported as unavailable.
    pub fn is_available(&self, low: Timestamp, high: Timestamp) -> bool {
        contains_window(self.root.as_deref(), low, high)
    }

    /// Every stored window overlapping `[low, high]` (inclusive bounds).
    pub fn overlapping(&self, low: Timestamp, high: Timestamp) -> Vec<Interval> {
        let mut found = Vec::new();
        collect_overlaps(self.root.as_deref(), low, high, &mut found);
        found
    }

    /// Subtracts `[low, high]` from every overlapping free window.
    ///
    /// Each overlapping window `[a, b]` is removed and its remainders
    /// `[a, low]` and `[high, b]` are stored back when non-empty. Returns the
    /// number of windows that were touched.
    pub fn reserve(&mut self, low: Timestamp, high: Timestamp) -> Result<usize, MatchError> {
        if low > high {
            return Err(MatchError::InvalidInterval { low, high });
        }

        let overlaps = self.overlapping(low, high);
        for window in &overlaps {
            self.remove(window.low, window.high);
            if window.low < low {
                self.insert_unchecked(window.low, low);
            }
            if high < window.high {
                self.insert_unchecked(high, window.high);
            }
        }

        Ok(overlaps.len())
    }

    /// Removes the exact window `[low, high)`; missing windows are ignored.
    fn remove(&mut self, low: Timestamp, high: Timestamp) {
        let mut removed = false;
        self.root = delete_node(self.root.take(), low, high, &mut removed);
        if removed {
            self.len -= 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Largest end time of any stored window.
    pub fn max_high(&self) -> Option<Timestamp> {
        self.root.as_ref().map(|node| node.max)
    }

    /// In-order snapshot of the stored windows (sorted by start).
    pub fn intervals(&self) -> Vec<Interval> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = Vec::new();
        let mut current = self.root.as_deref();
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                out.push(node.interval());
                current = node.right.as_deref();
            }
        }
        out
    }
}

fn insert_node(node: Option<Box<Node>>, low: Timestamp, high: Timestamp) -> Box<Node> {
    match node {
        None => Box::new(Node::new(low, high)),
        Some(mut node) => {
            if low < node.low {
                node.left = Some(insert_node(node.left.take(), low, high));
            } else {
                node.right = Some(insert_node(node.right.take(), low, high));
            }
            node.max = node.max.max(high);
            node
        }
    }
}

fn delete_node(
    node: Option<Box<Node>>,
    low: Timestamp,
    high: Timestamp,
    removed: &mut bool,
) -> Option<Box<Node>> {
    let mut node = node?;
    match low.cmp(&node.low) {
        Ordering::Less => node.left = delete_node(node.left.take(), low, high, removed),
        Ordering::Greater => node.right = delete_node(node.right.take(), low, high, removed),
        // Equal starts are inserted to the right.
        Ordering::Equal if node.high != high => {
            node.right = delete_node(node.right.take(), low, high, removed)
        }
        Ordering::Equal => {
            *removed = true;
            match (node.left.take(), node.right.take()) {
                (None, right) => return right,
                (left, None) => return left,
                (left, Some(right)) => {
                    let successor = leftmost(&right);
                    node.low = successor.low;
                    node.high = successor.high;
                    node.left = left;
                    let mut ignored = false;
                    node.right =
                        delete_node(Some(right), successor.low, successor.high, &mut ignored);
                }
            }
        }
    }
    node.refresh_max();
    Some(node)
}

fn leftmost(node: &Node) -> Interval {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current.interval()
}

fn collect_overlaps(node: Option<&Node>, low: Timestamp, high: Timestamp, out: &mut Vec<Interval>) {
    let Some(node) = node else {
        return;
    };
    if node.interval().overlaps(low, high) {
        out.push(node.interval());
    }
    if let Some(left) = node.left.as_deref() {
        if left.max >= low {
            collect_overlaps(Some(left), low, high, out);
        }
    }
    collect_overlaps(node.right.as_deref(), low, high, out);
}

fn contains_window(node: Option<&Node>, low: Timestamp, high: Timestamp) -> bool {
    let Some(node) = node else {
        return false;
    };
    if node.interval().contains(low, high) {
        return true;
    }
    if let Some(left) = node.left.as_deref() {
        if left.max >= low && contains_window(Some(left), low, high) {
            return true;
        }
    }
    contains_window(node.right.as_deref(), low, high)
}
