//! Domain layer for weatherdash
//!
//! Contains the weather data model, unit and calendar value objects, the
//! condition classifier and domain errors. Free of I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
