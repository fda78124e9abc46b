//! Geocoding adapter: postal code to coordinates over HTTP

mod client;
mod error;
mod traits;

pub use client::HttpGeocoder;
pub use error::GeocodeError;
pub use traits::{resolve_pair, Geocoder};

#[cfg(test)]
pub use traits::MockGeocoder;
