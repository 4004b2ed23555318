//! Schedule tables module.
//!
//! Static hour-of-day configuration the recommendation engine reads from.

mod tables;

pub use tables::ScheduleTables;
