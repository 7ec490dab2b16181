use crate::config::ConfigError;
use crate::frames::error::FrameError;
use crate::geocoding::error::GeocodingError;
use crate::weather_data::error::WeatherFetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CityWeatherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    #[error(transparent)]
    WeatherFetch(#[from] WeatherFetchError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Day offset {0} is out of the supported date range")]
    DateOutOfRange(i64),
}
