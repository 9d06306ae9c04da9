//! Application layer - Use cases and orchestration
//!
//! Owns the trip-planning flow state and the port definitions the
//! infrastructure adapters implement. Orchestrates domain objects;
//! performs no I/O of its own.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
