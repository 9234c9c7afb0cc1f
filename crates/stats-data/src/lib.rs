//! Data layer for chat statistics.
//!
//! Responsible for reading chat exports, deriving the count, word and
//! interaction views, and writing the aggregated report.

pub mod aggregator;
pub mod analysis;
pub mod interactions;
pub mod reader;
pub mod words;

pub use stats_core as core;
