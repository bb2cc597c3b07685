//! Departure feed integration for berlin-transport
//!
//! Fetches stop departures and stop search results from the
//! [transport.rest](https://v6.vbb.transport.rest) API (HAFAS-based, VBB
//! network) and normalizes raw records into [`domain::Departure`] entities.
//!
//! # Architecture
//!
//! [`TransitClient`] defines the interface for departure queries and stop
//! search, implemented by [`HafasTransitClient`]. Raw wire types live in
//! [`models`]; the record-to-entity rules live in [`normalizer`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::DepartureQuery;
//! use integration_transit::{HafasTransitClient, TransitClient, TransitConfig};
//!
//! let client = HafasTransitClient::new(&TransitConfig::default())?;
//! let departures = client
//!     .fetch_departures(&DepartureQuery::new("900100003"))
//!     .await?;
//! ```

mod client;
mod config;
mod error;
pub mod models;
pub mod normalizer;

pub use client::{HafasTransitClient, TransitClient};
pub use config::{InvalidRecordPolicy, TransitConfig};
pub use error::TransitError;
