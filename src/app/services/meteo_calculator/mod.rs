//! Rolling-window aggregation of derived meteorological values
//!
//! This module derives the accumulated and extremal statistics a MOSMIX
//! record carries alongside its hourly primaries. It is organized into:
//! - [`calculator`] - the per-station [`MeteoCalculator`] push/read API
//! - [`evicting_queue`] - the fixed-capacity ring buffer backing each window
//!
//! One calculator instance serves exactly one station and must be fed steps
//! in ascending time order; windows never share state across stations.

pub mod calculator;
pub mod evicting_queue;

#[cfg(test)]
pub mod tests;

pub use calculator::MeteoCalculator;
pub use evicting_queue::EvictingQueue;
