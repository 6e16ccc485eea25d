//! Terminal output formatting
//!
//! Display utilities for the command line.

pub mod display;
pub mod formatters;

pub use display::print_stats;
