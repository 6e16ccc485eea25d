//! Cross-session game statistics
//!
//! `Stats` is the snapshot written to disk; `StatsStore` serializes access to it
//! and applies the daily reset.

mod record;
mod store;

pub use record::Stats;
pub use store::{StatsError, StatsStore};
