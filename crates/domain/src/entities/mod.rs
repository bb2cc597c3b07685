//! Domain entities - Objects with identity and lifecycle

mod departure;
mod stop;

pub use departure::{Departure, RenderedDeparture};
pub use stop::Stop;
