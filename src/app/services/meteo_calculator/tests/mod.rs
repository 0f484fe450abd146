//! Tests for the rolling-window calculator and its backing queue.

pub mod calculator_tests;
