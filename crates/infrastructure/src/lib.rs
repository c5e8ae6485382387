//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and hosts configuration
//! loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ENV_PREFIX};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
