//! Application layer - Use cases and orchestration
//!
//! Contains the forecast aggregator, hourly selector, dashboard session state
//! and the controller that sequences refreshes, plus the port definitions
//! adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
