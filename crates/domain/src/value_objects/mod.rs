//! Value Objects - Immutable, identity-less domain primitives

mod departure_query;
mod line_type;
mod ring_direction;
mod transport_types;
mod vehicle_position;

pub use departure_query::{DepartureQuery, MIN_WALKING_OFFSET_MINUTES};
pub use line_type::LineType;
pub use ring_direction::RingDirection;
pub use transport_types::TransportTypes;
pub use vehicle_position::VehiclePosition;
