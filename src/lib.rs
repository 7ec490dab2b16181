mod city_weather;
mod config;
mod error;
mod frames;
mod geocoding;
mod types;
mod weather_data;

pub use city_weather::*;
pub use error::CityWeatherError;

pub use config::{
    default_cities, default_config_path, Config, ConfigError, DateWindow, DEFAULT_CITIES,
    DEFAULT_GEOCODING_URL, DEFAULT_WEATHER_BASE_URL,
};

pub use types::city_coordinate::{CityCoordinate, LatLon};
pub use types::daily_record::DailyRecord;
pub use types::hourly_record::HourlyRecord;
pub use types::weather_condition::WeatherCondition;

pub use geocoding::error::GeocodingError;
pub use geocoding::geocoder::Geocoder;

pub use weather_data::error::WeatherFetchError;
pub use weather_data::fetcher::HourlyFetcher;
pub use weather_data::request_url::{redact_api_key, Endpoint, RequestUrlBuilder};

pub use frames::daily_frame::DailyLazyFrame;
pub use frames::error::FrameError;
pub use frames::hourly_frame::{HourlyLazyFrame, DAILY_THRESHOLD};
