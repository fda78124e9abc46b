//! Trait abstraction for the geocoder to enable mocking in tests

use super::GeocodeError;
use crate::geo::Coordinate;
use async_trait::async_trait;

/// Resolves a postal code to a coordinate
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up the coordinate of an 8-digit postal code
    async fn resolve(&self, postal_code: &str) -> Result<Coordinate, GeocodeError>;
}

/// Resolve origin and destination concurrently.
///
/// Fails with the first error; the other lookup is dropped.
pub async fn resolve_pair(
    geocoder: &dyn Geocoder,
    origin: &str,
    destination: &str,
) -> Result<(Coordinate, Coordinate), GeocodeError> {
    tokio::try_join!(geocoder.resolve(origin), geocoder.resolve(destination))
}
