//! Domain types and breadth math for the market breadth dashboard.
//!
//! This crate is pure computation: it knows how to count advancing,
//! declining, and unchanged tickers from price pairs, and how snapshots
//! of those counts are shaped on the wire. Fetching prices and storing
//! snapshots live in `breadth-services`.

pub mod interval;
pub mod snapshot;
pub mod tally;

pub use interval::Interval;
pub use snapshot::{BreadthCounts, BreadthSnapshot};
pub use tally::tally;
