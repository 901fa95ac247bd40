//! Test fixtures for ride-matcher.
//!
//! Provides realistic test data including:
//! - Real Manhattan landmarks (lat, lng)
//! - Builders for the clock times used in scenarios

#![allow(dead_code)]

pub mod manhattan_locations;

pub use manhattan_locations::*;

/// Midnight UTC, 2024-08-29.
pub const DAY_START: i64 = 1_724_889_600;

/// Timestamp for `hour:minute` on the fixture day.
pub fn at(hour: i64, minute: i64) -> i64 {
    DAY_START + hour * 3600 + minute * 60
}
