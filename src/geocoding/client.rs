//! HTTP geocoder
//!
//! Resolution takes two sequential requests: a ViaCEP-style postal code
//! service turns the CEP into a street address, then a Nominatim-style search
//! turns that address into coordinates.

use super::{GeocodeError, Geocoder};
use crate::config::QuoteConfig;
use crate::geo::Coordinate;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Address returned by the postal code service
#[derive(Debug, Deserialize)]
struct PostalAddress {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    /// Present (as `true` or `"true"`) when the code does not exist
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

impl PostalAddress {
    fn is_missing(&self) -> bool {
        match &self.erro {
            None | Some(serde_json::Value::Bool(false)) => false,
            Some(_) => true,
        }
    }

    /// Free-text query for the geocoder, skipping empty parts
    fn search_query(&self) -> String {
        [&self.logradouro, &self.localidade, &self.uf]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One candidate from the geocoding search
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Geocoder backed by the public postal code and search services
pub struct HttpGeocoder {
    http: reqwest::Client,
    postal_base_url: String,
    geocoder_base_url: String,
}

impl HttpGeocoder {
    /// Build a geocoder from configuration
    pub fn new(config: &QuoteConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .user_agent(config.user_agent())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            postal_base_url: config.postal_lookup_url().trim_end_matches('/').to_string(),
            geocoder_base_url: config.geocoder_url().trim_end_matches('/').to_string(),
        })
    }

    async fn lookup_address(&self, cep: &str) -> Result<PostalAddress, GeocodeError> {
        let url = format!("{}/ws/{cep}/json/", self.postal_base_url);
        let address: PostalAddress = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if address.is_missing() {
            return Err(GeocodeError::PostalCodeNotFound(cep.to_string()));
        }
        Ok(address)
    }

    async fn search(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!("{}/search", self.geocoder_base_url);
        let places: Vec<Place> = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let place = places
            .first()
            .ok_or_else(|| GeocodeError::NoCoordinates(query.to_string()))?;

        Ok(Coordinate::new(
            parse_degrees(&place.lat, MAX_LATITUDE)?,
            parse_degrees(&place.lon, MAX_LONGITUDE)?,
        ))
    }
}

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// Parse decimal degrees, rejecting NaN, infinities and values beyond `limit`
fn parse_degrees(value: &str, limit: f64) -> Result<f64, GeocodeError> {
    let degrees: f64 = value
        .trim()
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad coordinate '{value}'")))?;
    if !degrees.is_finite() || degrees.abs() > limit {
        return Err(GeocodeError::InvalidResponse(format!(
            "coordinate out of range '{value}'"
        )));
    }
    Ok(degrees)
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn resolve(&self, postal_code: &str) -> Result<Coordinate, GeocodeError> {
        let cep: String = postal_code.chars().filter(char::is_ascii_digit).collect();
        tracing::debug!(%cep, "Resolving postal code");

        let address = self.lookup_address(&cep).await?;
        let query = address.search_query();
        if query.is_empty() {
            return Err(GeocodeError::NoCoordinates(cep));
        }

        let coordinate = self.search(&query).await?;
        tracing::debug!(%cep, lat = coordinate.lat, lon = coordinate.lon, "Postal code resolved");
        Ok(coordinate)
    }
}
