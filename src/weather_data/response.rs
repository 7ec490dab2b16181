//! Serde model of the One Call response and its flattening into hourly records.
//!
//! Only the fields the classification needs are modelled; everything else in the
//! body is ignored. A missing `hourly`, `dt`, `weather` or `main` is a parse error.

use crate::types::city_coordinate::CityCoordinate;
use crate::types::hourly_record::HourlyRecord;
use crate::types::weather_condition::WeatherCondition;
use crate::weather_data::error::WeatherFetchError;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    pub hourly: Vec<HourlyEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyEntry {
    /// Unix timestamp (seconds, UTC) of the start of the hour.
    pub dt: i64,
    pub weather: Vec<WeatherEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherEntry {
    pub main: String,
}

impl OneCallResponse {
    pub fn parse(body: &str, city: &str, date: NaiveDate) -> Result<Self, WeatherFetchError> {
        serde_json::from_str(body).map_err(|e| WeatherFetchError::MalformedResponse {
            city: city.to_string(),
            date,
            source: e,
        })
    }

    /// Emits one record per weather entry per hour.
    ///
    /// `date` is the requested target date and only labels errors; the records
    /// keep whatever hours the API returned.
    pub fn into_records(
        self,
        coordinate: &CityCoordinate,
        date: NaiveDate,
    ) -> Result<Vec<HourlyRecord>, WeatherFetchError> {
        let mut records = Vec::with_capacity(self.hourly.len());
        for hour in self.hourly {
            let timestamp = DateTime::from_timestamp(hour.dt, 0)
                .ok_or_else(|| WeatherFetchError::InvalidTimestamp {
                    city: coordinate.city.clone(),
                    date,
                    timestamp: hour.dt,
                })?
                .naive_utc();
            records.extend(hour.weather.into_iter().map(|entry| {
                HourlyRecord::new(coordinate, timestamp, WeatherCondition::from_main(&entry.main))
            }));
        }
        Ok(records)
    }
}
