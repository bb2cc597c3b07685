//! Domain layer for the Berlin transport departure board
//!
//! Contains the departure entity, line visuals, value objects, and domain errors.
//! This layer has no I/O and defines the ubiquitous language of the board.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use catalog::{DEFAULT_ICON, LineVisualCatalog, LineVisuals};
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
