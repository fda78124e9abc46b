//! Failures of the postal code and geocoding lookups

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Postal code {0} not found")]
    PostalCodeNotFound(String),

    #[error("No coordinates found for {0}")]
    NoCoordinates(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
