use crate::types::city_coordinate::CityCoordinate;
use crate::types::hourly_record::HourlyRecord;
use crate::weather_data::error::WeatherFetchError;
use crate::weather_data::request_url::{redact_api_key, Endpoint, RequestUrlBuilder};
use crate::weather_data::response::OneCallResponse;
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};
use reqwest::Client;

/// Fetches hourly weather for every city on one target date.
pub struct HourlyFetcher {
    client: Client,
    urls: RequestUrlBuilder,
    continue_on_error: bool,
}

impl HourlyFetcher {
    pub fn new(client: Client, urls: RequestUrlBuilder, continue_on_error: bool) -> Self {
        Self {
            client,
            urls,
            continue_on_error,
        }
    }

    /// Fetches `target` for each city in order and returns all their rows.
    ///
    /// The first failure aborts the day unless the fetcher was created with
    /// `continue_on_error`, in which case the failing city is logged and skipped.
    pub async fn fetch_day(
        &self,
        cities: &[CityCoordinate],
        target: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Vec<HourlyRecord>, WeatherFetchError> {
        let date = target.date_naive();
        info!(
            "Fetching {} weather for {} cities on {}",
            Endpoint::for_date(date, today),
            cities.len(),
            date
        );

        let mut records = Vec::new();
        for coordinate in cities {
            match self.fetch_city(coordinate, target, today).await {
                Ok(rows) => records.extend(rows),
                Err(e) if self.continue_on_error => {
                    warn!("Skipping {} on {}: {}", e.city(), e.date(), e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }

    pub async fn fetch_city(
        &self,
        coordinate: &CityCoordinate,
        target: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Vec<HourlyRecord>, WeatherFetchError> {
        let city = coordinate.city.as_str();
        let date = target.date_naive();
        let url = self
            .urls
            .build(coordinate.location, target, today)
            .map_err(|e| WeatherFetchError::Url {
                city: city.to_string(),
                date,
                source: e,
            })?;
        debug!("Requesting {}", redact_api_key(&url));

        let response = self.client.get(url).send().await.map_err(|e| {
            WeatherFetchError::NetworkRequest {
                city: city.to_string(),
                date,
                source: e.without_url(),
            }
        })?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {} on {}: {:?}", city, date, e.status());
                let e = e.without_url();
                return Err(match e.status() {
                    Some(status) => WeatherFetchError::HttpStatus {
                        city: city.to_string(),
                        date,
                        status,
                        source: e,
                    },
                    None => WeatherFetchError::NetworkRequest {
                        city: city.to_string(),
                        date,
                        source: e,
                    },
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| WeatherFetchError::NetworkRequest {
                city: city.to_string(),
                date,
                source: e.without_url(),
            })?;

        let records = OneCallResponse::parse(&body, city, date)?.into_records(coordinate, date)?;
        debug!("{} hourly rows for {} on {}", records.len(), city, date);
        Ok(records)
    }
}
