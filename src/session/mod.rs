//! Streaming game sessions
//!
//! `protocol` holds the messages exchanged with clients and `handler` drives a
//! single game from the first guess to its result.

mod handler;
pub mod protocol;

pub use handler::{SessionHandler, SessionOutcome};
pub use protocol::{ControlRequest, ErrorResponse, GuessRequest, StatsResponse};
