//! Resolves city names to coordinates using a Nominatim-compatible search endpoint.

use crate::geocoding::error::GeocodingError;
use crate::types::city_coordinate::{CityCoordinate, LatLon};
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// A single search hit. Nominatim reports coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

pub struct Geocoder {
    client: Client,
    endpoint: String,
}

impl Geocoder {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Resolves every city, one request at a time, in input order.
    ///
    /// Stops at the first city that can't be resolved.
    pub async fn locate_all(
        &self,
        cities: &[String],
    ) -> Result<Vec<CityCoordinate>, GeocodingError> {
        let mut coordinates = Vec::with_capacity(cities.len());
        for city in cities {
            coordinates.push(self.locate(city).await?);
        }
        info!("Resolved coordinates for {} cities", coordinates.len());
        Ok(coordinates)
    }

    /// Resolves a single city name to the coordinates of the first search match.
    pub async fn locate(&self, city: &str) -> Result<CityCoordinate, GeocodingError> {
        let url = self.search_url(city)?;
        debug!("Geocoding '{}' via {}", city, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GeocodingError::NetworkRequest {
                city: city.to_string(),
                source: e,
            })?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error while geocoding '{}': {:?}", city, e);
                return Err(match e.status() {
                    Some(status) => GeocodingError::HttpStatus {
                        city: city.to_string(),
                        status,
                        source: e,
                    },
                    None => GeocodingError::NetworkRequest {
                        city: city.to_string(),
                        source: e,
                    },
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::NetworkRequest {
                city: city.to_string(),
                source: e,
            })?;
        let places: Vec<Place> =
            serde_json::from_str(&body).map_err(|e| GeocodingError::MalformedResponse {
                city: city.to_string(),
                source: e,
            })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::Unresolved {
                city: city.to_string(),
            })?;

        let location = LatLon(
            parse_coordinate(city, &place.lat)?,
            parse_coordinate(city, &place.lon)?,
        );
        debug!("'{}' is at {:?}", city, location);
        Ok(CityCoordinate::new(city, location))
    }

    fn search_url(&self, city: &str) -> Result<Url, GeocodingError> {
        Url::parse_with_params(
            &self.endpoint,
            &[("q", city), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| GeocodingError::Url(self.endpoint.clone(), e))
    }
}

fn parse_coordinate(city: &str, value: &str) -> Result<f64, GeocodingError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodingError::InvalidCoordinate {
            city: city.to_string(),
            value: value.to_string(),
        })
}
