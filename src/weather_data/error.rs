use chrono::NaiveDate;
use thiserror::Error;

/// A failed weather fetch for one city on one target date.
#[derive(Debug, Error)]
pub enum WeatherFetchError {
    #[error("Invalid weather request URL for {city} on {date}")]
    Url {
        city: String,
        date: NaiveDate,
        #[source]
        source: url::ParseError,
    },

    #[error("Weather request failed for {city} on {date}")]
    NetworkRequest {
        city: String,
        date: NaiveDate,
        #[source]
        source: reqwest::Error,
    },

    #[error("Weather request for {city} on {date} failed with status {status}")]
    HttpStatus {
        city: String,
        date: NaiveDate,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed weather response for {city} on {date}")]
    MalformedResponse {
        city: String,
        date: NaiveDate,
        #[source]
        source: serde_json::Error,
    },

    #[error("Weather response for {city} on {date} contains invalid timestamp {timestamp}")]
    InvalidTimestamp {
        city: String,
        date: NaiveDate,
        timestamp: i64,
    },
}

impl WeatherFetchError {
    pub fn city(&self) -> &str {
        match self {
            WeatherFetchError::Url { city, .. }
            | WeatherFetchError::NetworkRequest { city, .. }
            | WeatherFetchError::HttpStatus { city, .. }
            | WeatherFetchError::MalformedResponse { city, .. }
            | WeatherFetchError::InvalidTimestamp { city, .. } => city,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            WeatherFetchError::Url { date, .. }
            | WeatherFetchError::NetworkRequest { date, .. }
            | WeatherFetchError::HttpStatus { date, .. }
            | WeatherFetchError::MalformedResponse { date, .. }
            | WeatherFetchError::InvalidTimestamp { date, .. } => *date,
        }
    }
}
